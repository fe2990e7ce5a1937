pub mod cursor;
pub mod device;
pub mod dispatch;
pub mod event;
pub mod filter;
pub mod focus;
pub mod keyboard;
pub mod pointer;
pub mod protocol;
pub mod seat;
pub mod touch;
pub mod ui;

pub use cursor::{Cursor, CursorImage, EventWindow};
pub use device::{DeviceClass, DeviceRegistry, InputDevice, SeatCapability};
pub use event::{DeviceEvent, InputEvent, InputEventKind};
pub use filter::{EventFilter, EventFilterChain};
pub use focus::FocusManager;
pub use keyboard::{KeyState, KeyboardModifiers, ModifiersState};
pub use pointer::{AxisOrientation, AxisSource, ButtonState, MouseButton, MouseButtons};
pub use protocol::SeatProtocol;
pub use seat::Seat;
pub use touch::{TouchFrame, TouchPoint, TouchPointState, TouchTracker};
pub use ui::LocalUi;
