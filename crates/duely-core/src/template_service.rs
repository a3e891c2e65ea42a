//! Safe mutations of the template collection.

use uuid::Uuid;

use duely_domain::{BillBook, PaymentTemplate};

use crate::CoreError;

pub struct TemplateService;

impl TemplateService {
    /// Adds a validated template and returns its id.
    pub fn add(book: &mut BillBook, template: PaymentTemplate) -> Result<Uuid, CoreError> {
        Self::validate(&template)?;
        let id = template.id;
        book.templates.push(template);
        book.touch();
        Ok(id)
    }

    /// Replaces an existing template wholesale, keyed by id.
    pub fn update(book: &mut BillBook, updated: PaymentTemplate) -> Result<(), CoreError> {
        Self::validate(&updated)?;
        let template = book
            .template_mut(updated.id)
            .ok_or(CoreError::TemplateNotFound(updated.id))?;
        *template = updated;
        book.touch();
        Ok(())
    }

    /// Removes a template along with every status record that references it.
    pub fn remove(book: &mut BillBook, id: Uuid) -> Result<(), CoreError> {
        if book.template(id).is_none() {
            return Err(CoreError::TemplateNotFound(id));
        }
        book.templates.retain(|template| template.id != id);
        book.statuses.retain(|status| status.template_id != id);
        book.touch();
        Ok(())
    }

    fn validate(template: &PaymentTemplate) -> Result<(), CoreError> {
        if template.title.trim().is_empty() {
            return Err(CoreError::Validation("title must not be empty".into()));
        }
        if template.amount.is_sign_negative() {
            return Err(CoreError::Validation(
                "amount must not be negative".into(),
            ));
        }
        Ok(())
    }
}
