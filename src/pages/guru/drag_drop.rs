//! Guru99 drag-and-drop accounting demo page

use tracing::info;

use crate::page::{Locator, PageActions, Strategy};
use crate::pages::GURU99_DRAG_DROP_URL;
use crate::Result;

fn amount_link(amount: &str) -> Locator {
    Locator::new(
        Strategy::XPath,
        format!("(//a[contains(text(),'{}')])[last()]", amount),
    )
}

fn card_amount_area(card_type: &str) -> Locator {
    Locator::new(
        Strategy::XPath,
        format!(
            "//td[h3[contains(text(), '{}')]]//div[@class='shoppingCart' and h3[contains(text(), 'Amount')]]//ol",
            card_type
        ),
    )
}

fn amount_label_in_card(card_type: &str) -> Locator {
    Locator::new(
        Strategy::XPath,
        format!(
            "//td[h3[contains(text(), '{}')]]//div[@class='shoppingCart' and h3[contains(text(), 'Amount')]]//li",
            card_type
        ),
    )
}

/// Drag-and-drop demo page
pub struct DragDropPage {
    actions: PageActions,
}

impl DragDropPage {
    /// Navigate to the drag-and-drop page
    pub async fn open(actions: PageActions) -> Result<Self> {
        actions.open(GURU99_DRAG_DROP_URL).await?;
        Ok(Self { actions })
    }

    pub async fn drag_amount_to_card_type(&self, amount: &str, card_type: &str) -> Result<()> {
        info!(amount, card_type, "Dragging amount to card type");
        self.actions
            .drag_and_drop(&amount_link(amount), &card_amount_area(card_type))
            .await
    }

    pub async fn verify_amount_in_card_type(&self, amount: &str, card_type: &str) -> Result<()> {
        info!(amount, card_type, "Verifying amount is displayed in card type");
        let actual = self
            .actions
            .read_text(&amount_label_in_card(card_type))
            .await?;
        let actual = actual.trim();
        self.actions.verify_eq(
            amount,
            actual,
            &format!(
                "Expected amount '{}' in card type '{}', but found '{}'",
                amount, card_type, actual
            ),
        )
    }
}
