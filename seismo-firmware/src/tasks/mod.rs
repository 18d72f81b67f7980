//! Embassy tasks
//!
//! One task per concern: motion interrupt service, cycle state
//! machine, periodic/event reporting, radio link TX, console, and
//! battery sampling.

pub mod battery;
pub mod console;
pub mod cycle;
pub mod motion;
pub mod report;
pub mod uplink;

pub use battery::battery_task;
pub use console::console_task;
pub use cycle::cycle_task;
pub use motion::motion_task;
pub use report::report_task;
pub use uplink::uplink_task;
