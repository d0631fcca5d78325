//! Probability propagation engines.

pub mod block_jump;
pub mod events;
pub mod fft;
pub mod two_sided;
pub mod workspace;

pub use block_jump::{
    BlockJumpPropagator, compute_one_sided_noncrossing_probability, default_block_size,
};
pub use events::{Event, EventKind, join_all_bounds};
pub use fft::{ConvolutionEngine, convolve_same_size_direct};
pub use two_sided::{
    CorridorState, TwoSidedPropagator, compute_two_sided_noncrossing_probability,
    poisson_process_noncrossing_probability,
};
pub use workspace::PropagationWorkspace;
