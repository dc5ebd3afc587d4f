//! Use cases - application services orchestrating domain entities through ports

pub mod publish_note;

pub use publish_note::PublishNoteUseCase;
