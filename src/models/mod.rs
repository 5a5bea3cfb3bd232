pub mod conf;
pub mod document;
pub mod element;
pub mod location;
pub mod screenplay_properties;
pub mod struct_token;
pub mod title;

pub use conf::Conf;
pub use document::Document;
pub use element::Element;
pub use location::Location;
pub use screenplay_properties::{Scene, ScreenplayProperties};
pub use struct_token::{Note, StructKind, StructToken, Synopsis};
pub use title::{TitleFields, TitleKey};
