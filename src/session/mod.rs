//! Driver session layer
//!
//! Creates browser sessions for a requested browser kind (locally or against a
//! Selenium Grid hub) and tracks them in an explicit per-execution-context
//! registry: one slot per context, idempotent initialize, quit always releases
//! the slot.
//!
//! ## Module structure
//! - `traits`: the session and factory seams the rest of the crate depends on
//! - `webdriver`: the live WebDriver-backed session
//! - `factory`: capability builders and endpoint selection per browser kind
//! - `registry`: context-to-session ownership map and lifecycle
//! - `mock`: scriptable in-memory session for tests

pub mod factory;
pub mod mock;
pub mod registry;
pub mod traits;
pub mod webdriver;

pub use factory::WebDriverFactory;
pub use registry::{ContextId, DriverRegistry};
pub use traits::{DriverSession, Locality, SessionFactory, WindowId};
pub use webdriver::WebDriverSession;

// Mock implementations are exported unconditionally so integration tests can
// wire a browserless registry.
pub use mock::{MockElement, MockFactory, MockSession};
