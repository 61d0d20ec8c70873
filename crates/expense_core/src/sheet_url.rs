use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::ExpenseError;
use crate::models::SheetRef;

lazy_static! {
    // Browser urls look like `.../sheets/<book>/<sheet>/expenses`, api urls
    // like `.../Book/<book>/Sheet/<sheet>/Row`.
    static ref BOOK_AND_SHEET: Regex =
        Regex::new(r"/([0-9]+)(?:/Sheet)?/([0-9]+)/").expect("book/sheet regex");
}

pub fn parse_book_and_sheet(sheet_url: &str) -> Result<SheetRef, ExpenseError> {
    let captures = BOOK_AND_SHEET
        .captures(sheet_url)
        .ok_or_else(|| ExpenseError::InvalidUrl(sheet_url.to_string()))?;
    Ok(SheetRef {
        book: captures[1].to_string(),
        sheet: captures[2].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_url() {
        let sheet =
            parse_book_and_sheet("https://www.whooweswho.net/session#/sheets/1234/6789/expenses")
                .unwrap();
        assert_eq!(sheet.book, "1234");
        assert_eq!(sheet.sheet, "6789");
    }

    #[test]
    fn api_url() {
        let sheet =
            parse_book_and_sheet("https://www.whooweswho.net/api/Book/1234/Sheet/6789/Row")
                .unwrap();
        assert_eq!(
            sheet,
            SheetRef {
                book: "1234".into(),
                sheet: "6789".into()
            }
        );
    }

    #[test]
    fn missing_trailing_segment_is_rejected() {
        let err = parse_book_and_sheet("https://www.whooweswho.net/sheets/1234/6789").unwrap_err();
        assert!(matches!(err, ExpenseError::InvalidUrl(_)));
    }

    #[test]
    fn error_echoes_url() {
        let err = parse_book_and_sheet("https://example.com/nothing/here").unwrap_err();
        assert!(err.to_string().contains("https://example.com/nothing/here"));
    }
}
