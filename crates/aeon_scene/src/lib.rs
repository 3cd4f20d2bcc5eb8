pub mod choreography;
pub mod cursor;
pub mod layout;
pub mod mapper;
pub mod player;
pub mod scenes;
pub mod sink;
pub mod timeline;

pub use choreography::{Choreographer, Choreography, CursorBinding, GroupId};
pub use cursor::{TimeCursorState, TimeCursorTracker};
pub use mapper::CoordinateMapper;
pub use player::{ElementVisual, Player};
pub use scenes::SceneKind;
pub use sink::{RenderSink, TraceSink};
pub use timeline::{EventTimeline, PlottedEvent};
