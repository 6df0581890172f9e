use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use encoding_rs::Encoding;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::cli::{CodePage, ExtractArgs};
use crate::model::{
    ExtractCounts, ExtractPaths, ExtractRunManifest, KEYWORD_CATEGORY_AUTO, KEYWORDS_FILE_NAME,
    KeywordEntry, KeywordsFile, KeywordsMetadata, LINKS_FILE_NAME, LinksFile, LinksMetadata,
    SECTIONS_FILE_NAME, SectionCategory, SectionKeywordLink, SectionRecord, SectionsFile,
    SectionsMetadata,
};
use crate::util::{
    backup_path, ensure_directory, now_utc_string, sha256_bytes, staging_path,
    utc_compact_string, write_json_pretty,
};

mod assemble;
mod code_page;
mod decode;
mod error;
mod keywords;
mod normalize;
mod output;
mod run;
mod segment;

pub use run::run;

use assemble::*;
use code_page::*;
use decode::*;
use error::*;
use keywords::*;
use normalize::*;
use output::*;
use segment::*;
