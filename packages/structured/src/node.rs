use std::collections::BTreeMap;

use structconf_core::{ObjectType, Value};

/// A node of the structured tree.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigNode {
    /// Named children. Leaf keys carry the default suffix.
    Group(BTreeMap<String, ConfigNode>),
    Config(Value),
}

impl ConfigNode {
    pub fn group() -> Self {
        ConfigNode::Group(BTreeMap::new())
    }

    pub fn kind(&self) -> ObjectType {
        match self {
            ConfigNode::Group(_) => ObjectType::Group,
            ConfigNode::Config(_) => ObjectType::Config,
        }
    }

    pub fn children(&self) -> Option<&BTreeMap<String, ConfigNode>> {
        match self {
            ConfigNode::Group(children) => Some(children),
            ConfigNode::Config(_) => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut BTreeMap<String, ConfigNode>> {
        match self {
            ConfigNode::Group(children) => Some(children),
            ConfigNode::Config(_) => None,
        }
    }

    /// Descend through exact child names; every step must be a group.
    pub fn group_at<'a, I, S>(&self, components: I) -> Option<&BTreeMap<String, ConfigNode>>
    where
        I: IntoIterator<Item = &'a S>,
        S: AsRef<str> + 'a,
    {
        let mut current = self.children()?;
        for component in components {
            current = current.get(component.as_ref())?.children()?;
        }
        Some(current)
    }

    pub fn group_at_mut<'a, I, S>(
        &mut self,
        components: I,
    ) -> Option<&mut BTreeMap<String, ConfigNode>>
    where
        I: IntoIterator<Item = &'a S>,
        S: AsRef<str> + 'a,
    {
        let mut current = self.children_mut()?;
        for component in components {
            current = current.get_mut(component.as_ref())?.children_mut()?;
        }
        Some(current)
    }
}

impl Default for ConfigNode {
    fn default() -> Self {
        ConfigNode::group()
    }
}
