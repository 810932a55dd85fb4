//! `dirmirror list <url>` – print how one listing page is classified.

use anyhow::Result;
use dirmirror_core::config::MirrorConfig;
use dirmirror_core::http::{HttpClient, HttpOptions};
use dirmirror_core::listing::{self, Classified, EntryKind};
use dirmirror_core::url_model::normalize_root_url;

use crate::cli::HttpArgs;

pub fn run_list(cfg: &MirrorConfig, url: &str, http: &HttpArgs) -> Result<()> {
    let url = normalize_root_url(url)?;
    let mut http_cfg = cfg.http.clone();
    http.apply(&mut http_cfg);
    let client = HttpClient::new(HttpOptions::from(&http_cfg));

    let html = client.fetch_listing(&url)?;
    let mut children = 0usize;
    for classified in listing::parse_listing(&html) {
        match classified {
            Classified::Child(entry) => {
                children += 1;
                let kind = match entry.kind {
                    EntryKind::Directory => "dir ",
                    EntryKind::File => "file",
                };
                println!("{}  {}", kind, entry.name);
            }
            Classified::Unsafe { href, name } => {
                println!("skip  {} (unsafe name {:?})", href, name)
            }
            Classified::Ignored => {}
        }
    }
    println!("{} entr{} in {}", children, if children == 1 { "y" } else { "ies" }, url);
    Ok(())
}
