// Browsing logic shared by the CLI and the GUI
pub mod catalog;
pub mod contact;
pub mod controller;
pub mod cycle;
pub mod error;
pub mod filter;
pub mod item;
pub mod pagination;
pub mod selection;
pub mod theme;

pub use catalog::{Catalog, Section};
pub use controller::{ControllerEvent, GalleryController};
pub use error::{FolioError, Result};
pub use filter::Category;
pub use item::{BrowsableItem, ItemId};
pub use pagination::DEFAULT_PAGE_SIZE;
pub use theme::ThemeMode;
