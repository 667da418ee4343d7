//! Interactive prompts for one bank request.

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use review_ingest::types::request::{DEFAULT_COUNTRY, DEFAULT_LANG, DEFAULT_MAX_REVIEWS};
use review_ingest::{AppleParams, BankRequest, PlayParams};

fn required(theme: &ColorfulTheme, prompt: &str) -> Result<String> {
    let value: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("a value is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(value.trim().to_string())
}

fn with_default(theme: &ColorfulTheme, prompt: &str, default: &str) -> Result<String> {
    let value: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;
    Ok(value.trim().to_string())
}

/// Ask for everything needed to ingest one bank.
pub fn prompt_bank(theme: &ColorfulTheme) -> Result<BankRequest> {
    let bank_name = required(theme, "Bank name")?;
    let app_id = required(theme, "App Store id")?;
    let package_id = required(theme, "Play Store package")?;
    let apple_country = with_default(theme, "App Store country", DEFAULT_COUNTRY)?;
    let play_country = with_default(theme, "Play Store country", DEFAULT_COUNTRY)?;
    let play_lang = with_default(theme, "Play Store language", DEFAULT_LANG)?;
    let max_reviews: usize = Input::with_theme(theme)
        .with_prompt("Reviews per store")
        .default(DEFAULT_MAX_REVIEWS)
        .interact_text()?;

    Ok(BankRequest::new(
        bank_name,
        AppleParams::new(app_id).with_country(apple_country),
        PlayParams::new(package_id)
            .with_lang(play_lang)
            .with_country(play_country),
    )
    .with_max_reviews(max_reviews))
}

pub fn confirm(theme: &ColorfulTheme, prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
