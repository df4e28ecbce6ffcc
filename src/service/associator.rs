use crate::models::{OcrDocument, PriceCandidate, RecognizedLine};

/// Finds the line closest in height to `price` that sits to its left.
///
/// Every line of the document is eligible, however far away. On equal distance the line
/// encountered first in block order wins.
pub fn nearest_description<'a>(
    document: &'a OcrDocument,
    price: &PriceCandidate<'_>,
) -> Option<&'a RecognizedLine> {
    let price_x = price.line.center_x();
    let price_y = price.line.center_y();

    let mut closest: Option<(&RecognizedLine, f64)> = None;
    for line in document.lines() {
        if line.center_x() >= price_x {
            continue;
        }
        let distance = (line.center_y() - price_y).abs();
        match closest {
            Some((_, best)) if distance >= best => {}
            _ => closest = Some((line, distance)),
        }
    }

    closest.map(|(line, _)| line)
}

/// Description text for a price: the text printed before it on the same line, else the
/// nearest line to its left.
pub fn describe(document: &OcrDocument, price: &PriceCandidate<'_>) -> Option<String> {
    if let Some(inline) = &price.inline_description {
        return Some(inline.clone());
    }
    nearest_description(document, price).map(|line| line.text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BoundingBox, TextBlock};
    use bigdecimal::BigDecimal;

    fn line(text: &str, left: f64, top: f64) -> RecognizedLine {
        RecognizedLine::new(text, BoundingBox::new(left, top, left + 40.0, top + 10.0))
    }

    fn price_at(line: &RecognizedLine) -> PriceCandidate<'_> {
        PriceCandidate {
            line,
            value: BigDecimal::from(1),
            canonical: "1.00".to_string(),
            inline_description: None,
        }
    }

    #[test]
    fn test_picks_same_row_on_the_left() {
        let price = line("$1.00", 200.0, 52.0);
        let document = OcrDocument::new(vec![TextBlock {
            lines: vec![
                line("Store", 0.0, 0.0),
                line("Apples", 0.0, 50.0),
                line("Pears", 0.0, 70.0),
                price.clone(),
            ],
        }]);

        let found = nearest_description(&document, &price_at(&price)).unwrap();
        assert_eq!(found.text, "Apples");
    }

    #[test]
    fn test_ignores_lines_on_the_right() {
        let price = line("$1.00", 100.0, 50.0);
        let document = OcrDocument::new(vec![TextBlock {
            lines: vec![line("Far left", 0.0, 300.0), line("Right side", 300.0, 50.0), price.clone()],
        }]);

        let found = nearest_description(&document, &price_at(&price)).unwrap();
        assert_eq!(found.text, "Far left");
    }

    #[test]
    fn test_tie_goes_to_first_encountered() {
        let price = line("$1.00", 200.0, 50.0);
        let document = OcrDocument::new(vec![
            TextBlock { lines: vec![line("Above", 0.0, 40.0)] },
            TextBlock { lines: vec![line("Below", 0.0, 60.0), price.clone()] },
        ]);

        let found = nearest_description(&document, &price_at(&price)).unwrap();
        assert_eq!(found.text, "Above");
    }

    #[test]
    fn test_no_line_to_the_left() {
        let price = line("$1.00", 0.0, 50.0);
        let document = OcrDocument::new(vec![TextBlock {
            lines: vec![line("Header", 100.0, 0.0), price.clone()],
        }]);

        assert!(nearest_description(&document, &price_at(&price)).is_none());
        assert!(describe(&document, &price_at(&price)).is_none());
    }

    #[test]
    fn test_inline_description_wins() {
        let price = line("Milk $3.99", 0.0, 50.0);
        let mut candidate = price_at(&price);
        candidate.inline_description = Some("Milk".to_string());
        let document = OcrDocument::new(vec![TextBlock { lines: vec![price.clone()] }]);

        assert_eq!(describe(&document, &candidate).as_deref(), Some("Milk"));
    }

    #[test]
    fn test_description_is_trimmed() {
        let price = line("$1.00", 200.0, 50.0);
        let document = OcrDocument::new(vec![TextBlock {
            lines: vec![line("  Bread ", 0.0, 50.0), price.clone()],
        }]);

        assert_eq!(describe(&document, &price_at(&price)).as_deref(), Some("Bread"));
    }
}
