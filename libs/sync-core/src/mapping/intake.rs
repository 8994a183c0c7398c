//! Medical-intake sub-mapping.
//!
//! A fixed set of free-text weight-loss intake questions is routed into one
//! named form submission on the target platform. In the shipped mapping the
//! source key doubles as the target question identifier.

use crate::contact::CustomField;
use crate::models::{FormAnswer, FormSubmission};

/// Name of the target-platform form the answers populate.
pub const FORM_NAME: &str = "GLP-1 Intake Questions Medical History";

/// Recognized intake question keys.
const INTAKE_QUESTION_KEYS: &[&str] = &[
    "check_all_that_apply_in_the_past_2_weeks_other",
    "if_yes_which_glp1_medication",
    "have_you_ever_been_diagnosed_with_any_of_the_following_conditions",
    "check_all_that_apply_in_the_past_2_weeks_gi__gu",
    "upload_a_picture_of_your_id_drivers_license__for_weight_loss_glp_upload_a_full_body_img",
    "upload_a_picture_of_your_id_drivers_license__for_weight_loss_glp_upload_a_full_body_image",
    "target_weight",
    "what_diets_or_programs_have_you_tried_in_the_past",
    "have_you_had_success_with_any_previous_weight_loss_programs_or_medications",
    "are_you_currently_tracking_your_food_or_calorie_intake",
    "check_all_that_apply_in_the_past_2_weeks",
    "current_weight",
    "check_all_that_apply_in_the_past_2_weeks_cont",
    "any_major_health_issues_in_your_immediate_family_parentssiblings",
    "social_history",
    "list_any_prescription_otc_or_supplements_you_take_regularly",
    "any_past_surgeries",
    "any_medication_allergies",
    "what_brings_you_here_today",
    "have_you_ever_been_diagnosed_with_any_of_the_following_conditions_below",
];

/// Whether `key` is one of the recognized intake questions.
pub fn is_intake_question(key: &str) -> bool {
    INTAKE_QUESTION_KEYS.contains(&key)
}

/// Package answered intake questions as a form submission.
///
/// Only answers with a non-empty value survive; zero survivors means no
/// submission at all, which callers treat as "no intake data", not an error.
pub fn build_form(answers: &[&CustomField]) -> Option<FormSubmission> {
    let fields: Vec<FormAnswer> = answers
        .iter()
        .filter(|field| !field.value.trim().is_empty())
        .map(|field| FormAnswer {
            id: field.key.clone(),
            value: field.value.clone(),
        })
        .collect();

    if fields.is_empty() {
        tracing::info!("No intake answers with values found");
        return None;
    }

    tracing::info!(count = fields.len(), "Collected intake answers");
    Some(FormSubmission {
        form_name: FORM_NAME.to_string(),
        fields,
    })
}
