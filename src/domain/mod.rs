//! Domain layer modules
//!
//! This module contains business domain logic:
//! - `template`: Response variants, catalog, and placeholder substitution
//! - `nlg`: Variant selection and rendering

pub mod nlg;
pub mod template;
