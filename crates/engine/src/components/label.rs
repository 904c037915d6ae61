use crate::prelude::*;

/// Human readable name attached by `Application::spawn`
#[derive(Component, Clone, Debug)]
pub struct Tag {
    pub label: String,
}
