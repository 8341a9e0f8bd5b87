//! Page sources: where the engine gets interpreted pages from.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::Page;

/// A provider of interpreted pages.
///
/// Page numbers are 1-indexed. A source may fail for individual pages; the
/// engine decides whether that is fatal based on its error mode.
pub trait PageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Produce one page.
    fn load_page(&self, number: u32) -> Result<Page>;
}

fn check_range(number: u32, count: u32) -> Result<usize> {
    if number == 0 || number > count {
        return Err(Error::PageOutOfRange(number, count));
    }
    Ok((number - 1) as usize)
}

impl PageSource for Vec<Page> {
    fn page_count(&self) -> u32 {
        self.len() as u32
    }

    fn load_page(&self, number: u32) -> Result<Page> {
        let index = check_range(number, self.page_count())?;
        Ok(self[index].clone())
    }
}

impl PageSource for [Page] {
    fn page_count(&self) -> u32 {
        self.len() as u32
    }

    fn load_page(&self, number: u32) -> Result<Page> {
        let index = check_range(number, self.page_count())?;
        Ok(self[index].clone())
    }
}

/// Pages from a JSON page dump: an array of page objects.
///
/// The array is parsed up front, but each page is only decoded when loaded,
/// so one malformed page does not make the others unreadable. Pages are
/// numbered by their position in the array.
#[derive(Debug, Clone)]
pub struct JsonPageSource {
    pages: Vec<Value>,
}

impl JsonPageSource {
    /// Read a page dump from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let pages: Vec<Value> = serde_json::from_reader(reader)?;
        Ok(Self { pages })
    }

    /// Read a page dump from a file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse a page dump from a string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let pages: Vec<Value> = serde_json::from_str(json)?;
        Ok(Self { pages })
    }
}

impl PageSource for JsonPageSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn load_page(&self, number: u32) -> Result<Page> {
        let index = check_range(number, self.page_count())?;
        let mut page: Page =
            serde_json::from_value(self.pages[index].clone()).map_err(|e| Error::PageUnreadable {
                page: number,
                reason: e.to_string(),
            })?;
        if page.number != number {
            log::debug!("Page entry {} declares number {}", number, page.number);
            page.number = number;
        }
        Ok(page)
    }
}
