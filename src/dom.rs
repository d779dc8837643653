use crate::generator::{Password, generate};
use std::collections::HashMap;
use tracing::debug;

pub const DEFAULT_TARGETS: [&str; 2] = ["id_cpanel_password", "id_cpanel_new_password"];
pub const DEFAULT_LABEL: &str = "Generar segura";

pub const TRIGGER_CLASS: &str = "button";
pub const TRIGGER_STYLE: [(&str, &str); 2] = [("margin-left", "8px"), ("vertical-align", "middle")];

pub trait Document {
    type Element: Clone;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    fn is_attached(&self, element: &Self::Element) -> bool;

    fn mark_attached(&mut self, element: &Self::Element);

    fn create_trigger(&mut self, label: &str) -> Option<Self::Element>;

    fn insert_after(&mut self, anchor: &Self::Element, element: &Self::Element);

    fn bind_trigger(&mut self, trigger: &Self::Element, target: &Self::Element);

    fn set_value(&mut self, element: &Self::Element, value: &str);

    fn focus(&mut self, element: &Self::Element);

    fn dispatch_change(&mut self, element: &Self::Element);
}

/// Missing or already-attached targets yield `None`.
pub fn attach<D: Document>(doc: &mut D, target_id: &str, label: &str) -> Option<D::Element> {
    let Some(target) = doc.element_by_id(target_id) else {
        debug!(target_id, "generator target not found");
        return None;
    };
    if doc.is_attached(&target) {
        debug!(target_id, "generator already attached");
        return None;
    }

    let trigger = doc.create_trigger(label)?;
    doc.mark_attached(&target);
    doc.insert_after(&target, &trigger);
    doc.bind_trigger(&trigger, &target);
    debug!(target_id, label, "generator attached");

    Some(trigger)
}

pub fn fill_target<D: Document>(doc: &mut D, target: &D::Element) -> Password {
    let password = generate();
    doc.set_value(target, &password);
    doc.focus(target);
    doc.dispatch_change(target);
    password
}

pub fn install_defaults<D: Document>(doc: &mut D) -> usize {
    DEFAULT_TARGETS
        .iter()
        .filter_map(|id| attach(doc, id, DEFAULT_LABEL))
        .count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
pub struct Node {
    pub tag: String,
    pub id: Option<String>,
    pub input_type: Option<String>,
    pub class_name: String,
    pub text: String,
    pub value: String,
    pub style: Vec<(String, String)>,
    pub generator_attached: bool,
}

type ChangeListener = Box<dyn FnMut(&str)>;

#[derive(Default)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    order: Vec<NodeId>,
    ids: HashMap<String, NodeId>,
    bindings: HashMap<NodeId, NodeId>,
    listeners: HashMap<NodeId, Vec<ChangeListener>>,
    changes: Vec<NodeId>,
    focused: Option<NodeId>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_input(&mut self, id: &str, input_type: &str) -> NodeId {
        let node = self.push(Node {
            tag: "input".to_string(),
            id: Some(id.to_string()),
            input_type: Some(input_type.to_string()),
            ..Node::default()
        });
        self.ids.insert(id.to_string(), node);
        self.order.push(node);
        node
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn children(&self) -> &[NodeId] {
        &self.order
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn change_count(&self, id: NodeId) -> usize {
        self.changes.iter().filter(|changed| **changed == id).count()
    }

    pub fn add_change_listener(&mut self, id: NodeId, listener: impl FnMut(&str) + 'static) {
        self.listeners
            .entry(id)
            .or_default()
            .push(Box::new(listener));
    }

    pub fn click(&mut self, trigger: NodeId) -> Option<Password> {
        let target = *self.bindings.get(&trigger)?;
        Some(fill_target(self, &target))
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }
}

impl Document for MemoryDocument {
    type Element = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    fn is_attached(&self, element: &NodeId) -> bool {
        self.node(*element).generator_attached
    }

    fn mark_attached(&mut self, element: &NodeId) {
        self.nodes[element.0].generator_attached = true;
    }

    fn create_trigger(&mut self, label: &str) -> Option<NodeId> {
        let style = TRIGGER_STYLE
            .iter()
            .map(|(property, value)| (property.to_string(), value.to_string()))
            .collect();
        Some(self.push(Node {
            tag: "button".to_string(),
            input_type: Some("button".to_string()),
            class_name: TRIGGER_CLASS.to_string(),
            text: label.to_string(),
            style,
            ..Node::default()
        }))
    }

    fn insert_after(&mut self, anchor: &NodeId, element: &NodeId) {
        self.order.retain(|node| node != element);
        match self.order.iter().position(|node| node == anchor) {
            Some(index) => self.order.insert(index + 1, *element),
            None => self.order.push(*element),
        }
    }

    fn bind_trigger(&mut self, trigger: &NodeId, target: &NodeId) {
        self.bindings.insert(*trigger, *target);
    }

    fn set_value(&mut self, element: &NodeId, value: &str) {
        self.nodes[element.0].value = value.to_string();
    }

    fn focus(&mut self, element: &NodeId) {
        self.focused = Some(*element);
    }

    fn dispatch_change(&mut self, element: &NodeId) {
        self.changes.push(*element);
        let value = &self.nodes[element.0].value;
        if let Some(listeners) = self.listeners.get_mut(element) {
            for listener in listeners.iter_mut() {
                listener(value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::Policy;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn form() -> (MemoryDocument, NodeId, NodeId) {
        let mut doc = MemoryDocument::new();
        let password = doc.add_input("id_cpanel_password", "password");
        let new_password = doc.add_input("id_cpanel_new_password", "password");
        (doc, password, new_password)
    }

    #[test]
    fn test_missing_target_is_noop() {
        let mut doc = MemoryDocument::new();
        assert!(attach(&mut doc, "id_missing", DEFAULT_LABEL).is_none());
        assert!(doc.is_empty());

        let (mut doc, _, _) = form();
        assert!(attach(&mut doc, "id_missing", DEFAULT_LABEL).is_none());
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_attach_is_idempotent() {
        let (mut doc, password, _) = form();

        let trigger = attach(&mut doc, "id_cpanel_password", DEFAULT_LABEL);
        assert!(trigger.is_some());
        assert!(attach(&mut doc, "id_cpanel_password", DEFAULT_LABEL).is_none());

        let buttons = doc
            .children()
            .iter()
            .filter(|id| doc.node(**id).tag == "button")
            .count();
        assert_eq!(buttons, 1);
        assert_eq!(doc.len(), 3);
        assert!(doc.node(password).generator_attached);
    }

    #[test]
    fn test_trigger_inserted_after_target() {
        let (mut doc, password, new_password) = form();
        let trigger = attach(&mut doc, "id_cpanel_password", "Generate").unwrap();

        assert_eq!(doc.children(), &[password, trigger, new_password]);

        let button = doc.node(trigger);
        assert_eq!(button.text, "Generate");
        assert_eq!(button.class_name, "button");
        assert_eq!(button.input_type.as_deref(), Some("button"));
        assert!(
            button
                .style
                .contains(&("margin-left".to_string(), "8px".to_string()))
        );
    }

    #[test]
    fn test_click_fills_focuses_and_notifies() {
        let (mut doc, password, _) = form();
        let trigger = attach(&mut doc, "id_cpanel_password", DEFAULT_LABEL).unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        doc.add_change_listener(password, move |value| sink.borrow_mut().push(value.to_string()));

        let generated = doc.click(trigger).unwrap();
        let value = doc.node(password).value.clone();

        assert_eq!(value, generated.as_str());
        assert!(Policy::default().audit(&value).is_empty());
        assert_eq!(doc.focused(), Some(password));
        assert_eq!(doc.change_count(password), 1);
        assert_eq!(*seen.borrow(), vec![value]);
    }

    #[test]
    fn test_second_click_replaces_value() {
        let (mut doc, password, _) = form();
        let trigger = attach(&mut doc, "id_cpanel_password", DEFAULT_LABEL).unwrap();

        doc.click(trigger).unwrap();
        let first = doc.node(password).value.clone();
        doc.click(trigger).unwrap();
        let second = doc.node(password).value.clone();

        assert_ne!(first, second);
        assert_eq!(doc.change_count(password), 2);
    }

    #[test]
    fn test_click_on_unbound_node() {
        let (mut doc, password, _) = form();
        assert!(doc.click(password).is_none());
        assert_eq!(doc.change_count(password), 0);
        assert!(doc.node(password).value.is_empty());
    }

    #[test]
    fn test_install_defaults() {
        let (mut doc, password, new_password) = form();

        assert_eq!(install_defaults(&mut doc), 2);
        assert_eq!(install_defaults(&mut doc), 0);
        assert_eq!(doc.len(), 4);
        assert!(doc.node(password).generator_attached);
        assert!(doc.node(new_password).generator_attached);
    }

    #[test]
    fn test_install_defaults_partial_form() {
        let mut doc = MemoryDocument::new();
        doc.add_input("id_cpanel_new_password", "password");

        assert_eq!(install_defaults(&mut doc), 1);
        assert_eq!(doc.len(), 2);
    }
}
