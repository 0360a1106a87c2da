use crate::dependency_tree::domain::{Configuration, DependencyRecord};

/// A node waiting on the stack for its subtree to be completed
struct DepthStackFrame {
    depth: usize,
    node: DependencyRecord,
}

/// HierarchyBuilder reconstructs nested configurations from a preorder
/// stream of `(depth, record)` pairs.
///
/// Frames own their nodes until they are popped; a popped node is attached to
/// the frame beneath it, or to the current configuration when it was the
/// bottom frame. Since the frame beneath cannot change while a node sits on
/// the stack, this attaches every node to the parent it had when pushed.
#[derive(Default)]
pub struct HierarchyBuilder {
    configurations: Vec<Configuration>,
    current_config: Option<Configuration>,
    stack: Vec<DepthStackFrame>,
    dropped: usize,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closes the active configuration (if any) and starts a new one
    pub fn start_configuration(&mut self, record: DependencyRecord) {
        self.close_configuration();
        self.current_config = Some(record);
    }

    /// Adds a nested record at the given depth.
    ///
    /// Frames at the same or a deeper level are closed first, so siblings
    /// share a parent instead of nesting under each other. Records that
    /// arrive before any configuration are dropped.
    pub fn attach(&mut self, depth: usize, record: DependencyRecord) {
        if self.current_config.is_none() {
            self.dropped += 1;
            tracing::debug!(record = %record, "dropping dependency line before any configuration");
            return;
        }

        while self.stack.last().is_some_and(|frame| frame.depth >= depth) {
            self.pop_frame();
        }

        self.stack.push(DepthStackFrame {
            depth,
            node: record,
        });
    }

    /// Nested records dropped because no configuration was active
    pub fn dropped_lines(&self) -> usize {
        self.dropped
    }

    /// Closes everything still open and returns the configurations in source order
    pub fn finish(mut self) -> Vec<Configuration> {
        self.close_configuration();
        self.configurations
    }

    fn pop_frame(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };

        match self.stack.last_mut() {
            Some(parent) => parent.node.push_dependency(frame.node),
            None => {
                if let Some(config) = self.current_config.as_mut() {
                    config.push_dependency(frame.node);
                }
            }
        }
    }

    fn close_configuration(&mut self) {
        while !self.stack.is_empty() {
            self.pop_frame();
        }
        if let Some(config) = self.current_config.take() {
            self.configurations.push(config);
        }
    }
}
