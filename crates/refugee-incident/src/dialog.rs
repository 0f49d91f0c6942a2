//! Branching dialog primitives and the refugee decision tree.
//!
//! A [`DialogTree`] is an arena of nodes; options link to other nodes by
//! [`NodeId`]. A [`DialogSession`] walks one tree as the player chooses
//! options and runs each option's command at most once.

use std::fmt;

use incident_events::{AreaId, CharacterDescriptor, Faction};
use rand::RngCore;
use thiserror::Error;

use crate::commands::{AcceptRefugee, ReleaseRefugee};
use crate::composer::NarrativeText;
use crate::host::{CommandHost, Localizer};
use crate::keys;
use crate::locator::SpawnCandidate;
use crate::scheduler::DelayedEventScheduler;

/// A side effect attached to a dialog option.
///
/// Commands own everything they touch, so they outlive the worker that built them.
pub trait DialogCommand: fmt::Debug + Send {
    fn execute(self: Box<Self>, host: &mut dyn CommandHost, rng: &mut dyn RngCore);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

#[derive(Debug)]
pub struct DialogOption {
    pub label: String,
    pub command: Option<Box<dyn DialogCommand>>,
    /// Choosing this option closes the dialog
    pub resolves_tree: bool,
    pub link: Option<NodeId>,
}

impl DialogOption {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            command: None,
            resolves_tree: false,
            link: None,
        }
    }

    pub fn with_command(mut self, command: impl DialogCommand + 'static) -> Self {
        self.command = Some(Box::new(command));
        self
    }

    pub fn resolving(mut self) -> Self {
        self.resolves_tree = true;
        self
    }

    pub fn linked_to(mut self, node: NodeId) -> Self {
        self.link = Some(node);
        self
    }
}

#[derive(Debug)]
pub struct DialogNode {
    pub text: String,
    pub options: Vec<DialogOption>,
}

impl DialogNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: Vec::new(),
        }
    }

    pub fn with_option(mut self, option: DialogOption) -> Self {
        self.options.push(option);
        self
    }
}

/// Arena of dialog nodes. The first node added is the root.
#[derive(Debug, Default)]
pub struct DialogTree {
    nodes: Vec<DialogNode>,
}

impl DialogTree {
    pub fn new(root: DialogNode) -> Self {
        Self { nodes: vec![root] }
    }

    pub fn add_node(&mut self, node: DialogNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn node(&self, id: NodeId) -> Option<&DialogNode> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut DialogNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn root(&self) -> Option<&DialogNode> {
        self.node(NodeId::ROOT)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Where a session ended up after a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogStep {
    /// Followed a link to another node
    Moved(NodeId),
    /// Option had neither link nor resolve flag
    Stayed(NodeId),
    /// Dialog closed
    Resolved,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DialogError {
    #[error("dialog already resolved")]
    AlreadyResolved,
    #[error("no option {index} on current node ({available} available)")]
    NoSuchOption { index: usize, available: usize },
    #[error("option links to missing node {0:?}")]
    DanglingLink(NodeId),
}

/// A presented dialog awaiting player input.
#[derive(Debug)]
pub struct DialogSession {
    tree: DialogTree,
    current: NodeId,
    resolved: bool,
}

impl DialogSession {
    pub fn new(tree: DialogTree) -> Self {
        Self {
            tree,
            current: NodeId::ROOT,
            resolved: false,
        }
    }

    pub fn tree(&self) -> &DialogTree {
        &self.tree
    }

    pub fn current_id(&self) -> NodeId {
        self.current
    }

    pub fn current(&self) -> Option<&DialogNode> {
        self.tree.node(self.current)
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Labels of the options on the current node.
    pub fn option_labels(&self) -> Vec<&str> {
        self.current()
            .map(|n| n.options.iter().map(|o| o.label.as_str()).collect())
            .unwrap_or_default()
    }

    /// Chooses option `index` on the current node, running its command.
    ///
    /// After a resolving option fires, every further call fails with
    /// [`DialogError::AlreadyResolved`] and no command runs.
    pub fn choose(
        &mut self,
        index: usize,
        host: &mut dyn CommandHost,
        rng: &mut dyn RngCore,
    ) -> Result<DialogStep, DialogError> {
        if self.resolved {
            return Err(DialogError::AlreadyResolved);
        }

        let node = self
            .tree
            .node(self.current)
            .ok_or(DialogError::DanglingLink(self.current))?;
        let available = node.options.len();
        let option = node
            .options
            .get(index)
            .ok_or(DialogError::NoSuchOption { index, available })?;
        let resolves = option.resolves_tree;
        let link = option.link;

        if let Some(next) = link {
            if !resolves && self.tree.node(next).is_none() {
                return Err(DialogError::DanglingLink(next));
            }
        }
        tracing::debug!("Dialog option chosen: {}", option.label);

        let command = self
            .tree
            .node_mut(self.current)
            .and_then(|n| n.options.get_mut(index))
            .and_then(|o| o.command.take());
        if let Some(command) = command {
            command.execute(host, rng);
        }

        if resolves {
            self.resolved = true;
            return Ok(DialogStep::Resolved);
        }
        match link {
            Some(next) => {
                self.current = next;
                Ok(DialogStep::Moved(next))
            }
            None => Ok(DialogStep::Stayed(self.current)),
        }
    }
}

/// Builds the accept/reject tree for a refugee.
#[derive(Debug, Clone, Copy)]
pub struct DialogTreeBuilder {
    raid_points_factor: f32,
    scheduler: DelayedEventScheduler,
}

impl DialogTreeBuilder {
    pub fn new(raid_points_factor: f32, scheduler: DelayedEventScheduler) -> Self {
        Self {
            raid_points_factor,
            scheduler,
        }
    }

    /// Root node shows `text` with Accept (resolving) then Reject (links to
    /// an acknowledgement with a single resolving OK).
    pub fn build<L: Localizer + ?Sized>(
        &self,
        text: NarrativeText,
        character: CharacterDescriptor,
        spawn: SpawnCandidate,
        faction: &Faction,
        area: &AreaId,
        localizer: &L,
    ) -> DialogTree {
        let rejected_text =
            localizer.translate(keys::REJECTED, &[character.name.short.clone()]);
        let acknowledgement = DialogNode::new(rejected_text)
            .with_option(DialogOption::new(localizer.translate(keys::OK, &[])).resolving());

        let accept = DialogOption::new(localizer.translate(keys::ACCEPT, &[]))
            .with_command(AcceptRefugee {
                character: character.clone(),
                area: area.clone(),
                cell: spawn.cell(),
                enemy: faction.id.clone(),
                points_factor: self.raid_points_factor,
                scheduler: self.scheduler,
            })
            .resolving();

        let mut tree = DialogTree::new(DialogNode::new(text.into_string()).with_option(accept));
        let ack_id = tree.add_node(acknowledgement);

        let reject = DialogOption::new(localizer.translate(keys::REJECT, &[]))
            .with_command(ReleaseRefugee { character })
            .linked_to(ack_id);
        if let Some(root) = tree.node_mut(NodeId::ROOT) {
            root.options.push(reject);
        }

        tree
    }
}
