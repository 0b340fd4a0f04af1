//! Operation handlers, one `impl Shell` block per command family.

mod fs;
mod sys;
mod text;
