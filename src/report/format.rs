//! Formatted terminal output for selection paths.
//!
//! We keep formatting code in one place so:
//! - the selection code stays clean and testable
//! - output changes are localized

use crate::domain::PathFile;
use crate::select::PathCheck;

/// Step table plus the coefficients of the recommended subset.
pub fn format_path_summary(file: &PathFile) -> String {
    let mut out = String::new();

    out.push_str("=== bestsubset - greedy forward selection ===\n");
    out.push_str(&format!(
        "Data: m={} observations | n={} candidate features | steps={}\n",
        file.n_obs,
        file.n_features,
        file.order.len()
    ));

    out.push_str("\nPath:\n");
    out.push_str(&format!(
        "  {:>4}  {:<20} {:>14} {:>12} {:>12}\n",
        "size", "added", "RSS", "RMSE", "BIC"
    ));
    for step in &file.steps {
        let chosen = if Some(step.size) == file.recommended_size { "*" } else { " " };
        out.push_str(&format!(
            "{chosen} {:>4}  {:<20} {:>14.6e} {:>12.6} {:>12.3}\n",
            step.size,
            feature_label(file, step.feature),
            step.rss,
            step.rmse,
            step.bic
        ));
    }

    match file.recommended_size {
        Some(size) => {
            out.push_str(&format!("\nRecommended subset (size {size}, min BIC within 2):\n"));
            let coefs = size.checked_sub(1).and_then(|row| file.coefficients.get(row));
            match (coefs, file.order.get(..size)) {
                (Some(coefs), Some(active)) => {
                    for &f in active {
                        match coefs.get(f) {
                            Some(v) => out.push_str(&format!("- {:<20} {:>14.6}\n", feature_label(file, f), v)),
                            None => out.push_str(&format!("- {:<20} {:>14}\n", feature_label(file, f), "n/a")),
                        }
                    }
                }
                _ => out.push_str("- coefficients missing from this file\n"),
            }
        }
        None => out.push_str("\nNo finite step: the design is rank deficient from the first step.\n"),
    }

    out
}

/// One-paragraph result of `verify_path`.
pub fn format_check(check: &PathCheck) -> String {
    let mut out = String::from("Direct least-squares check:\n");
    out.push_str(&format!(
        "- max coefficient deviation: {:.3e}{}\n",
        check.max_coefficient_deviation,
        check
            .worst_step
            .map(|s| format!(" (size {})", s + 1))
            .unwrap_or_default()
    ));
    out.push_str(&format!("- max relative RSS deviation: {:.3e}\n", check.max_rss_deviation));
    if !check.unsolved_steps.is_empty() {
        let sizes: Vec<String> = check.unsolved_steps.iter().map(|s| (s + 1).to_string()).collect();
        out.push_str(&format!("- direct solve failed at sizes: {}\n", sizes.join(", ")));
    }
    out
}

/// Compare the greedy subset of size `|support|` with the true support.
pub fn format_recovery(file: &PathFile, support: &[usize]) -> String {
    let k = support.len();
    if k == 0 || k > file.order.len() {
        return format!("True support: {} informative features (not covered by the path).\n", k);
    }
    let mut chosen = file.order[..k].to_vec();
    chosen.sort_unstable();
    let hits = chosen.iter().filter(|f| support.contains(f)).count();
    let status = if hits == k { "recovered" } else { "missed" };
    format!(
        "True support {}: {}/{} informative features in the size-{} subset ({status}).\n",
        fmt_indices(support),
        hits,
        k,
        k
    )
}

fn feature_label(file: &PathFile, feature: usize) -> String {
    file.feature_names
        .get(feature)
        .cloned()
        .unwrap_or_else(|| format!("x{feature}"))
}

fn fmt_indices(v: &[usize]) -> String {
    let parts: Vec<String> = v.iter().map(|x| x.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SelectionPath;
    use crate::io::build_path_file;

    fn file() -> PathFile {
        let selection = SelectionPath {
            n_obs: 3,
            n_features: 2,
            features: vec![1, 0],
            weights: vec![0.0, 5.0, 3.0, 5.0],
            rss: vec![58.0, 49.0],
            total_sum_of_squares: 83.0,
        };
        build_path_file(&selection, &["a".to_string(), "b".to_string()])
    }

    #[test]
    fn summary_lists_every_step() {
        let text = format_path_summary(&file());
        assert!(text.contains("m=3 observations"));
        assert!(text.lines().filter(|l| l.contains("e1")).count() >= 2);
        assert!(text.contains("Recommended subset"));
    }

    #[test]
    fn truncated_file_does_not_panic() {
        let mut f = file();
        f.coefficients.truncate(1);
        f.recommended_size = Some(2);
        let text = format_path_summary(&f);
        assert!(text.contains("coefficients missing"));

        let mut f = file();
        f.order[0] = 9;
        f.recommended_size = Some(1);
        assert!(format_path_summary(&f).contains("n/a"));
    }

    #[test]
    fn recovery_counts_hits() {
        let text = format_recovery(&file(), &[1]);
        assert!(text.contains("1/1"));
        assert!(text.contains("recovered"));
        let text = format_recovery(&file(), &[0]);
        assert!(text.contains("missed"));
    }
}
