//! Dynamath Templates: seeded math flashcard generators.
//!
//! Each template turns a seed and a config object into the HTML for one
//! side of a card. Generation is a pure function of the request: the front
//! and back of a card replay the same random draws, so rendering both
//! sides from one seed always yields a matching question and answer.
//!
//! [`registry::TemplateRegistry`] maps ids to descriptors and
//! [`render::CardRenderer`] ties the registry to the review-seed resolver
//! from `dynamath-core`.

pub mod arithmetic;
pub mod config;
pub mod expressions;
pub mod html;
pub mod number_theory;
pub mod numeric;
pub mod registry;
pub mod render;
pub mod template;

pub use config::{CardFields, TemplateConfig};
pub use registry::TemplateRegistry;
pub use render::{CardRenderer, CardRequest, RenderedCard};
pub use template::{
    GenerationRequest, GenerationResult, Generator, Side, TemplateDescriptor, TemplateMeta,
    ValidationReport,
};
