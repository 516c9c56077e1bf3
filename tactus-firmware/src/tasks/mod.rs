//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod midi_rx;
pub mod midi_tx;
pub mod thru;

pub use midi_rx::midi_rx_task;
pub use midi_tx::midi_tx_task;
pub use thru::thru_task;
