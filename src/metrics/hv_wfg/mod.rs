pub use wfg::Wfg;

mod wfg;
