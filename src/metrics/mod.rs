pub use hv_native::NativeCommand;
pub use hv_pisa::Pisa;
pub use hv_wfg::Wfg;
pub use hypervolume::{HyperVolume, HyperVolumeAlgorithm};
pub use indicator::Indicator;
pub use reference_transform::ReferenceTransform;

mod hv_native;
mod hv_pisa;
mod hv_wfg;
mod hypervolume;
mod indicator;
mod reference_transform;
