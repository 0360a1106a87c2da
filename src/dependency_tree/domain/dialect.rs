/// Characters that build tools use to draw dependency trees.
///
/// A trimmed line starting with any of these is never a root declaration.
pub const TREE_DRAWING_CHARS: &[char] = &['+', '|', '\\', '│', '├', '└', '─', '┬'];

const ASCII_MARKERS: &[char] = &['+', '|', '\\'];
const BOX_MARKERS: &[char] = &['│', '├', '└', '─', '┬'];

/// How a single dependency notation is delimited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotationStyle {
    /// `group:name[:type]:version[:scope]`
    Colon,
    /// `name@version`
    At,
}

/// TreeDialect selects the text conventions of the tool that drew the tree
///
/// Maven (`mvn dependency:tree`) and Gradle (`gradle dependencies`) share the
/// ASCII marker set but differ in branch marker length. pnpm draws with
/// Unicode box glyphs and uses `name@version` notations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeDialect {
    Maven,
    Gradle,
    Pnpm,
}

impl TreeDialect {
    pub fn notation_style(&self) -> NotationStyle {
        match self {
            TreeDialect::Maven | TreeDialect::Gradle => NotationStyle::Colon,
            TreeDialect::Pnpm => NotationStyle::At,
        }
    }

    /// Branch-marker characters stripped from a prefix during depth inference
    pub fn marker_chars(&self) -> &'static [char] {
        match self {
            TreeDialect::Maven | TreeDialect::Gradle => ASCII_MARKERS,
            TreeDialect::Pnpm => BOX_MARKERS,
        }
    }

    /// Guesses the dialect from raw tool output.
    ///
    /// Box glyphs mean pnpm, a `+---`/`\---` marker means Gradle,
    /// anything else is treated as Maven.
    pub fn detect(text: &str) -> Self {
        if text.chars().any(|c| BOX_MARKERS.contains(&c)) {
            TreeDialect::Pnpm
        } else if text.contains("+---") || text.contains("\\---") {
            TreeDialect::Gradle
        } else {
            TreeDialect::Maven
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TreeDialect::Maven => "maven",
            TreeDialect::Gradle => "gradle",
            TreeDialect::Pnpm => "pnpm",
        }
    }
}

impl std::str::FromStr for TreeDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "maven" | "mvn" => Ok(TreeDialect::Maven),
            "gradle" => Ok(TreeDialect::Gradle),
            "pnpm" | "node" | "npm" => Ok(TreeDialect::Pnpm),
            _ => Err(format!(
                "Invalid dialect: {}. Please specify 'maven', 'gradle' or 'pnpm'",
                s
            )),
        }
    }
}

impl std::fmt::Display for TreeDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
