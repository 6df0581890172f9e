use super::*;

const MANIFEST_VERSION: u32 = 1;

/// Segmentation, normalization and keyword extraction wired together for one
/// document.
pub struct Pipeline {
    segmenter: SectionSegmenter,
    assembler: SectionAssembler,
}

#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub headers_found: usize,
    pub assembly: Assembly,
}

impl Pipeline {
    pub fn new(code_page: CodePage, max_keywords: usize, min_content_chars: usize) -> Result<Self> {
        let normalizer = TextNormalizer::new(profile_for(code_page))?;
        let extractor = KeywordExtractor::new(max_keywords)?;
        Ok(Self {
            segmenter: SectionSegmenter::new()?,
            assembler: SectionAssembler::new(normalizer, extractor, min_content_chars),
        })
    }

    /// `None` when the document holds no section header at all.
    pub fn process(&self, document: &str, file_source: &str) -> Option<PipelineOutcome> {
        let spans = self.segmenter.segment(document)?;
        let assembly = self.assembler.assemble(document, &spans, file_source);
        Some(PipelineOutcome {
            headers_found: spans.len(),
            assembly,
        })
    }
}

pub fn run(args: ExtractArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("extract-{}", utc_compact_string(started_ts));

    info!(
        input = %args.input.display(),
        run_id = %run_id,
        code_page = args.code_page.as_str(),
        "starting extraction"
    );

    let pipeline = Pipeline::new(args.code_page, args.max_keywords, args.min_content_chars)?;
    let (bytes, document) = read_document(&args.input)?;

    let mut warnings = Vec::<String>::new();
    info!(
        encoding = %document.encoding,
        bytes = bytes.len(),
        chars = document.text.chars().count(),
        "decoded input"
    );
    if document.dropped_sequences > 0 {
        let message = format!(
            "dropped {} undecodable byte sequences while decoding as {}",
            document.dropped_sequences, document.encoding
        );
        warn!(input = %args.input.display(), "{message}");
        warnings.push(message);
    }

    let file_source = args
        .input
        .file_name()
        .and_then(|name| name.to_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| args.input.display().to_string());

    let outcome = pipeline
        .process(&document.text, &file_source)
        .ok_or_else(|| ExtractError::NoSections {
            path: args.input.clone(),
        })?;

    let counts = ExtractCounts {
        input_bytes: bytes.len(),
        decoded_chars: document.text.chars().count(),
        headers_found: outcome.headers_found,
        sections_emitted: outcome.assembly.sections.len(),
        sections_discarded: outcome.assembly.discarded,
        keywords_total: outcome.assembly.keywords.len(),
        links_total: outcome.assembly.links.len(),
        unresolved_links: outcome.assembly.unresolved_links,
    };
    info!(
        headers = counts.headers_found,
        sections = counts.sections_emitted,
        discarded = counts.sections_discarded,
        keywords = counts.keywords_total,
        links = counts.links_total,
        "assembled sections"
    );

    if args.dry_run {
        info!("extraction dry-run complete");
        return Ok(());
    }

    let processed_at = now_utc_string();
    let files = build_output_files(
        outcome.assembly,
        SourceInfo {
            source_file: args.input.display().to_string(),
            source_sha256: sha256_bytes(&bytes),
            encoding: document.encoding.clone(),
        },
        &processed_at,
    );

    ensure_directory(&args.output_dir)?;
    let paths = OutputPaths::in_dir(&args.output_dir);
    write_outputs(&paths, &files)?;

    info!(path = %paths.sections.display(), "wrote sections");
    info!(path = %paths.keywords.display(), "wrote keywords");
    info!(path = %paths.links.display(), "wrote section keyword links");

    let manifest_path = args.manifest_path.clone().unwrap_or_else(|| {
        args.output_dir.join("manifests").join(format!(
            "extract_run_{}.json",
            utc_compact_string(started_ts)
        ))
    });
    let manifest = ExtractRunManifest {
        manifest_version: MANIFEST_VERSION,
        run_id,
        status: "completed".to_string(),
        started_at,
        updated_at: now_utc_string(),
        encoding: document.encoding,
        code_page: pipeline.assembler.normalizer().profile_name().to_string(),
        min_content_chars: args.min_content_chars,
        max_keywords: args.max_keywords,
        paths: ExtractPaths {
            input_path: args.input.display().to_string(),
            output_dir: args.output_dir.display().to_string(),
            sections_path: paths.sections.display().to_string(),
            keywords_path: paths.keywords.display().to_string(),
            links_path: paths.links.display().to_string(),
        },
        counts,
        warnings,
    };
    write_json_pretty(&manifest_path, &manifest)?;

    info!(path = %manifest_path.display(), "wrote extract run manifest");
    info!(
        sections = manifest.counts.sections_emitted,
        keywords = manifest.counts.keywords_total,
        links = manifest.counts.links_total,
        "extraction completed"
    );

    Ok(())
}
