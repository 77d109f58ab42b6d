// Index module: version ranges, the asset index, and pack resolution

pub mod repository;
pub mod resolver;
pub mod validate;
pub mod version;
pub mod version_range;

pub use repository::{AssetIndex, AssetIndexEntry};
pub use resolver::{AssetResolver, ResolvedAsset};
