pub mod emodel;
pub mod impairment;
pub mod types;

pub use emodel::{delay_to_id, moslqo_to_r, r_to_moslqo};
pub use impairment::{speex_loss_delay_to_r, IePoint, IeTable, LossImpairment};
pub use types::*;
