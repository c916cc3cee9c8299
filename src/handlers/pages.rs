use chrono::NaiveDate;

use crate::models::Evaluation;
use crate::validation::{MAX_AGE, MIN_AGE};

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>MS Expungement Decider</title>
</head>
<body>
<main style="max-width: 46rem; margin: 0 auto; font-family: sans-serif;">
<h1>&#9878;&#65039; Mississippi Expungement Decider</h1>
<p>This tool checks whether your record may be eligible for expungement under Mississippi law.</p>
"#;

const EXPORT_FAILED: &str =
    "<p><strong>Something went wrong while creating the PDF summary.</strong></p>";

const TAIL: &str = "</main>\n</body>\n</html>\n";

pub fn form_page() -> String {
    form_page_on(chrono::Local::now().date_naive())
}

/// Form page with the completion date preset to `today`
pub fn form_page_on(today: NaiveDate) -> String {
    let today = today.format("%Y-%m-%d");
    format!(
        r#"{HEAD}<form method="post" action="/check">
<p><label>Charge (e.g., Shoplifting, DUI, Assault)<br><input type="text" name="charge"></label></p>
<p><label>Offense Type<br><select name="offense_type">
<option value="Misdemeanor" selected>Misdemeanor</option>
<option value="Felony">Felony</option>
</select></label></p>
<fieldset><legend>Were you convicted?</legend>
<label><input type="radio" name="convicted" value="Yes" checked> Yes</label>
<label><input type="radio" name="convicted" value="No"> No</label>
</fieldset>
<p><label>Date Sentence Completed<br><input type="date" name="sentence_completed" value="{today}" required></label></p>
<fieldset><legend>Is this your first offense?</legend>
<label><input type="radio" name="first_offense" value="Yes" checked> Yes</label>
<label><input type="radio" name="first_offense" value="No"> No</label>
</fieldset>
<p><label>County of Offense<br><input type="text" name="county"></label></p>
<p><label>Your age at the time of offense<br><input type="number" name="age" min="{MIN_AGE}" max="{MAX_AGE}" step="1" value="{MIN_AGE}" required></label></p>
<p><button type="submit">Check Eligibility</button></p>
</form>
{TAIL}"#
    )
}

/// Result page. The report HTML is inserted as rendered; the download link
/// is replaced by a notice when the summary could not be exported.
pub fn result_page(eval: &Evaluation) -> String {
    let export = match &eval.document {
        Ok(doc) => format!(
            r#"<p><a href="/download/{id}" download="{file_name}">&#128229; Download Expungement Summary (PDF)</a></p>
<p><strong>Analysis complete. Summary saved with ID: {id}</strong></p>"#,
            id = doc.file_id,
            file_name = doc.file_name,
        ),
        Err(_) => EXPORT_FAILED.to_string(),
    };

    format!(
        r#"{HEAD}<section>
{report}</section>
{export}
<p><a href="/">Check another record</a></p>
{TAIL}"#,
        report = eval.rendered.html,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExpungementError;
    use crate::models::{EligibilityReport, ExportedDocument, RenderedReport};
    use std::path::PathBuf;

    #[test]
    fn test_form_has_seven_inputs() {
        let page = form_page();
        for name in [
            "charge",
            "offense_type",
            "convicted",
            "sentence_completed",
            "first_offense",
            "county",
            "age",
        ] {
            assert!(page.contains(&format!(r#"name="{name}""#)), "{name}");
        }
    }

    #[test]
    fn test_date_defaults_to_today() {
        let page = form_page_on(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
        assert!(page.contains(r#"name="sentence_completed" value="2026-10-16""#));
    }

    #[test]
    fn test_result_page_without_document_still_shows_report() {
        let eval = Evaluation {
            report: EligibilityReport("Eligible \u{2014} yes".to_string()),
            rendered: RenderedReport {
                markdown: "Eligible \u{2014} yes".to_string(),
                html: "<p>Eligible \u{2014} yes</p>\n".to_string(),
            },
            document: Err(ExpungementError::UnsupportedCharacter {
                ch: '\u{2014}',
                position: 33,
            }),
        };
        let page = result_page(&eval);
        assert!(page.contains("<p>Eligible \u{2014} yes</p>"));
        assert!(page.contains(EXPORT_FAILED));
        assert!(!page.contains("/download/"));
    }

    #[test]
    fn test_result_page_embeds_report() {
        let eval = Evaluation {
            report: EligibilityReport("**Eligible**".to_string()),
            rendered: RenderedReport {
                markdown: "**Eligible**".to_string(),
                html: "<p><strong>Eligible</strong></p>\n".to_string(),
            },
            document: Ok(ExportedDocument {
                file_id: "Ab3dE6g8".to_string(),
                file_name: "expungement_summary_Ab3dE6g8.pdf".to_string(),
                path: PathBuf::from("exports/expungement_summary_Ab3dE6g8.pdf"),
                body: String::new(),
                page_count: 1,
            }),
        };
        let page = result_page(&eval);
        assert!(page.contains("<p><strong>Eligible</strong></p>"));
        assert!(page.contains(r#"href="/download/Ab3dE6g8""#));
        assert!(page.contains("Summary saved with ID: Ab3dE6g8"));
    }
}
