//! Model to entity mappers

mod document;
