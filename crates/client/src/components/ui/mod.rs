//! UI primitives (Button, Card, Input, etc.)

pub mod button;
pub mod card;
pub mod input;
pub mod notice;

pub use button::*;
pub use card::*;
pub use input::*;
pub use notice::*;
