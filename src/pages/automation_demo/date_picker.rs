//! Automation Testing date picker page

use chrono::Datelike;
use tracing::info;

use crate::page::{Locator, PageActions, Strategy};
use crate::pages::AUTOMATION_DEMO_DATE_PICKER_URL;
use crate::util::dates;
use crate::{Error, Result};

const TXT_DATE_DISABLE: Locator = Locator::id("datepicker1");
const BTN_NEXT_MONTH: Locator = Locator::xpath("//a[@title='Next']");
const BTN_PREV_MONTH: Locator = Locator::xpath("//a[@title='Prev']");
const LBL_MONTH_YEAR: Locator = Locator::class_name("ui-datepicker-title");
const TBL_DATE_PICKER: Locator = Locator::class_name("ui-datepicker-calendar");

// Far more than any realistic distance between the displayed and target month
const MAX_MONTH_STEPS: u32 = 600;

fn day_cell(day: u32) -> Locator {
    Locator::new(
        Strategy::XPath,
        format!(
            "//table[@class='ui-datepicker-calendar']//a[text()='{}']",
            day
        ),
    )
}

/// Date picker demo page
pub struct DatePickerPage {
    actions: PageActions,
}

impl DatePickerPage {
    /// Navigate to the date picker page
    pub async fn open(actions: PageActions) -> Result<Self> {
        actions.open(AUTOMATION_DEMO_DATE_PICKER_URL).await?;
        Ok(Self { actions })
    }

    /// Select a `MM/DD/YYYY` date in the disabled-textbox picker
    ///
    /// Opens the calendar, steps month by month to the target, clicks the day,
    /// and waits for the calendar to close.
    pub async fn select_date_disable(&self, date: &str) -> Result<()> {
        info!(date, "Selecting date");
        let target = dates::parse_us_date(date)?;

        self.actions.click(&TXT_DATE_DISABLE).await?;

        let mut steps = 0;
        loop {
            let header = self.actions.read_text(&LBL_MONTH_YEAR).await?;
            let (month, year) = dates::parse_month_year(&header)?;

            if year > target.year() || (year == target.year() && month > target.month()) {
                self.actions.click(&BTN_PREV_MONTH).await?;
            } else if year < target.year() || month < target.month() {
                self.actions.click(&BTN_NEXT_MONTH).await?;
            } else {
                break;
            }

            steps += 1;
            if steps >= MAX_MONTH_STEPS {
                return Err(Error::timeout(format!(
                    "Calendar never reached {} after {} steps",
                    date, steps
                )));
            }
        }

        self.actions.click(&day_cell(target.day())).await?;
        self.actions.wait_for_invisible(&TBL_DATE_PICKER).await?;
        info!(date, "Date selected");
        Ok(())
    }

    pub async fn verify_selected_date_disable(&self, date: &str) -> Result<()> {
        info!(date, "Verifying selected date");
        let actual = self.actions.read_value(&TXT_DATE_DISABLE).await?;
        self.actions.verify_eq(
            date,
            actual.as_str(),
            &format!(
                "The date {} is not selected as expected, current date is {}",
                date, actual
            ),
        )
    }
}
