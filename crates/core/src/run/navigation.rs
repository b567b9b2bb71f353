use tracing::debug;

use super::*;

impl RunManager {
    pub fn current_node(&self) -> Option<usize> {
        self.state.current_node
    }

    /// Node 0 before the party has moved, otherwise the current node's
    /// successors. Empty when no map exists.
    pub fn available_nodes(&self) -> Vec<usize> {
        if self.state.map.is_empty() {
            return Vec::new();
        }
        match self.state.current_node {
            None => vec![0],
            Some(index) => {
                self.state.map.get(index).map(|node| node.connections.clone()).unwrap_or_default()
            }
        }
    }

    pub fn move_to_node(&mut self, index: usize) -> Result<(), RunError> {
        if index >= self.state.map.len() {
            return Err(RunError::UnknownNode(index));
        }
        if !self.available_nodes().contains(&index) {
            return Err(RunError::NodeNotReachable(index));
        }
        self.state.current_node = Some(index);
        debug!(target: "autobattler::run", node = index, "node.entered");
        self.log.push(RunEvent::NodeEntered { index });
        Ok(())
    }

    /// Idempotent; completing a node twice logs it once.
    pub fn mark_node_completed(&mut self, index: usize) -> Result<(), RunError> {
        let node = self.state.map.get_mut(index).ok_or(RunError::UnknownNode(index))?;
        if node.completed {
            return Ok(());
        }
        node.completed = true;
        debug!(target: "autobattler::run", node = index, "node.completed");
        self.log.push(RunEvent::NodeCompleted { index });
        Ok(())
    }

    /// True once the final node of the map, the last act's boss, is completed.
    pub fn is_map_cleared(&self) -> bool {
        self.state.map.last().is_some_and(|node| node.completed)
    }
}
