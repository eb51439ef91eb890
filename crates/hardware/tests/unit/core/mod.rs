/// Pipeline structure tests.
pub mod pipeline;
