//! Page objects for the target sites
//!
//! One module per site. Each page declares a private locator set, optionally
//! opens its page URL on construction, and exposes semantic methods that chain
//! façade calls into one user-facing action or verification. Pages hold the
//! façade by composition and no other state.

pub mod applitools;
pub mod automation_demo;
pub mod guru;

// Guru99 demo site URLs
pub const GURU99_TOOLTIPS_URL: &str = "https://demo.guru99.com/test/tooltip.html";
pub const GURU99_DRAG_DROP_URL: &str = "https://demo.guru99.com/test/drag_drop.html";

// Automation Testing demo site URLs
pub const AUTOMATION_DEMO_ALERTS_URL: &str = "https://demo.automationtesting.in/Alerts.html";
pub const AUTOMATION_DEMO_DATE_PICKER_URL: &str =
    "https://demo.automationtesting.in/Datepicker.html";
pub const AUTOMATION_DEMO_WINDOWS_URL: &str = "https://demo.automationtesting.in/Windows.html";
pub const AUTOMATION_DEMO_FILE_UPLOAD_URL: &str =
    "https://demo.automationtesting.in/FileUpload.html";
pub const AUTOMATION_DEMO_FILE_DOWNLOAD_URL: &str =
    "https://demo.automationtesting.in/FileDownload.html";
