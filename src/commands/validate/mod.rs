use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Result, bail};
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::ValidateArgs;
use crate::model::{
    KEYWORDS_FILE_NAME, KeywordsFile, LINKS_FILE_NAME, LinksFile, SECTIONS_FILE_NAME,
    SectionsFile,
};
use crate::util::{now_utc_string, read_json, write_json_pretty};

mod invariants;
mod run;
#[cfg(test)]
mod tests;

pub use self::run::run;

use self::invariants::*;
