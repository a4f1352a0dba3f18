//! Service layer: repository calls plus domain logic

pub mod closure;
