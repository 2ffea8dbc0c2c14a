//! Completion adapters implementing the [`CompletionGateway`](debate_application::CompletionGateway) port.

mod github_models;

pub use github_models::GitHubModelsGateway;
