use async_trait::async_trait;
use sbom_orchestrator::prelude::*;
use sbom_orchestrator::shared::error::OrchestratorError;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

type SideEffect = Box<dyn Fn(&CommandInvocation) + Send + Sync>;

struct Rule {
    program: String,
    args: Vec<String>,
    dir: Option<PathBuf>,
    output: CommandOutput,
    side_effect: Option<SideEffect>,
}

impl Rule {
    fn matches(&self, invocation: &CommandInvocation) -> bool {
        let program = Path::new(invocation.program())
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(invocation.program());
        program == self.program
            && invocation.arguments().starts_with(&self.args)
            && self
                .dir
                .as_deref()
                .is_none_or(|dir| invocation.working_dir() == Some(dir))
    }
}

/// Successful output with the given stdout
pub fn ok(stdout: &str) -> CommandOutput {
    CommandOutput {
        status: Some(0),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

/// Exit status 1 with the given stderr
pub fn failed(stderr: &str) -> CommandOutput {
    CommandOutput {
        status: Some(1),
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}

/// Mock CommandRunner answering from scripted rules
///
/// Rules match on the program's file name and an argument prefix; the
/// first matching rule wins. A command no rule matches behaves like a
/// program that is not installed.
#[derive(Clone, Default)]
pub struct MockCommandRunner {
    rules: Arc<Mutex<Vec<Rule>>>,
    calls: Arc<Mutex<Vec<CommandInvocation>>>,
}

#[allow(dead_code)]
impl MockCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, program: &str, args: &[&str], output: CommandOutput) -> Self {
        self.push(program, args, None, output, None)
    }

    /// Like `respond`, only for commands run in `dir`
    pub fn respond_in(self, dir: &Path, program: &str, args: &[&str], output: CommandOutput) -> Self {
        self.push(program, args, Some(dir.to_path_buf()), output, None)
    }

    /// Like `respond`, running `effect` first (e.g. to write an output file)
    pub fn respond_with(
        self,
        program: &str,
        args: &[&str],
        output: CommandOutput,
        effect: impl Fn(&CommandInvocation) + Send + Sync + 'static,
    ) -> Self {
        self.push(program, args, None, output, Some(Box::new(effect)))
    }

    fn push(
        self,
        program: &str,
        args: &[&str],
        dir: Option<PathBuf>,
        output: CommandOutput,
        side_effect: Option<SideEffect>,
    ) -> Self {
        self.rules.lock().unwrap().push(Rule {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            dir,
            output,
            side_effect,
        });
        self
    }

    pub fn calls(&self) -> Vec<CommandInvocation> {
        self.calls.lock().unwrap().clone()
    }

    /// Rendered command lines, in call order
    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(|c| c.to_string()).collect()
    }
}

#[async_trait]
impl CommandRunner for MockCommandRunner {
    async fn run(&self, invocation: &CommandInvocation) -> Result<CommandOutput> {
        self.calls.lock().unwrap().push(invocation.clone());

        let rules = self.rules.lock().unwrap();
        let Some(rule) = rules.iter().find(|rule| rule.matches(invocation)) else {
            return Err(OrchestratorError::ToolNotFound {
                tool: invocation.program().to_string(),
                hint: "not scripted in MockCommandRunner".to_string(),
            }
            .into());
        };
        if let Some(effect) = &rule.side_effect {
            effect(invocation);
        }
        Ok(rule.output.clone())
    }
}
