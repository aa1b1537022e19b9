use crate::domain::controller::Controller;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct ControllerRegistry {
    controllers: HashMap<&'static str, Arc<dyn Controller>>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, controller: Arc<dyn Controller>) {
        self.controllers.insert(controller.id(), controller);
    }

    pub fn get(&self, controller_id: &str) -> Option<Arc<dyn Controller>> {
        self.controllers.get(controller_id).cloned()
    }
}
