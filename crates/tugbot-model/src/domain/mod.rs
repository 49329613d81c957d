mod env;
pub use env::Env;

mod keyset;
pub use keyset::KeySet;

mod labels;
pub use labels::Labels;

mod constants;
pub use constants::{
    LABEL_CREATED_FROM, LABEL_STOP_SIGNAL, LABEL_TEST, LABEL_TUGBOT, LABEL_ZODIAC, STATE_EXITED,
};
