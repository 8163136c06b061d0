pub mod generation_ctx;
pub mod generation_cycle;

pub use generation_ctx::GenerationCtx;
pub use generation_cycle::GenerationCycle;
