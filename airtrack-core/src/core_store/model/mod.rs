pub mod airdrop;
pub mod category;
pub mod entity;
pub mod link;
pub mod testnet;
pub mod tool;
pub mod types;
pub mod video;

pub use airdrop::{Airdrop, AirdropPatch, NewAirdrop};
pub use category::Category;
pub use entity::{Completable, Entity};
pub use link::{Link, MAX_LINKS};
pub use testnet::{NewTestnet, Testnet, TestnetPatch};
pub use tool::{NewTool, Tool, ToolPatch};
pub use types::{CategoryId, EntityId, EntityKind, Timestamp, UserId};
pub use video::{NewVideo, Video, VideoPatch};
