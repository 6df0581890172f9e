use super::*;

pub fn run(args: ValidateArgs) -> Result<()> {
    let report_path = args.report_path.clone().unwrap_or_else(|| {
        args.output_dir
            .join("manifests")
            .join("validation_report.json")
    });

    info!(output_dir = %args.output_dir.display(), "validating extraction outputs");

    let report = build_report(
        &args.output_dir,
        ValidationLimits {
            min_content_chars: args.min_content_chars,
            max_keywords: args.max_keywords,
        },
    )?;
    write_json_pretty(&report_path, &report)?;

    for check in report.checks.iter().filter(|check| check.result == "failed") {
        warn!(
            check_id = %check.check_id,
            name = %check.name,
            violations = check.violations,
            "check failed"
        );
    }

    info!(path = %report_path.display(), "wrote validation report");
    info!(
        total = report.summary.total_checks,
        passed = report.summary.passed,
        failed = report.summary.failed,
        pending = report.summary.pending,
        "validation completed"
    );

    if report.summary.failed > 0 {
        bail!("{} validation checks failed", report.summary.failed);
    }

    Ok(())
}

pub fn build_report(output_dir: &Path, limits: ValidationLimits) -> Result<ValidationReport> {
    let sections: SectionsFile = read_json(&output_dir.join(SECTIONS_FILE_NAME))?;
    let keywords: KeywordsFile = read_json(&output_dir.join(KEYWORDS_FILE_NAME))?;
    let links: LinksFile = read_json(&output_dir.join(LINKS_FILE_NAME))?;

    let checks = build_quality_checks(&sections, &keywords, &links, limits);
    let summary = summarize_checks(&checks);

    Ok(ValidationReport {
        manifest_version: 1,
        generated_at: now_utc_string(),
        output_dir: output_dir.display().to_string(),
        summary,
        checks,
    })
}
