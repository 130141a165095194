//! Reading the `x,y` point table typed into the form.
//!
//! The first non-blank line must be the header, every other non-blank line an
//! integer pair. A single bad row rejects the whole table so a typo never
//! turns into a silently shifted diagram.

use crate::error::DiagramError;
use crate::point::Point;

pub fn parse_points(text: &str) -> Result<Vec<Point>, DiagramError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    match lines.next() {
        Some((_, header)) if is_header(header) => {}
        _ => return Err(DiagramError::MissingHeader),
    }

    let mut points = Vec::new();
    for (line_no, line) in lines {
        let point = parse_row(line).ok_or_else(|| DiagramError::MalformedRow {
            line: line_no,
            content: line.to_string(),
        })?;
        points.push(point);
    }
    if points.is_empty() {
        return Err(DiagramError::EmptyInput);
    }
    tracing::debug!(count = points.len(), "parsed point table");
    Ok(points)
}

fn is_header(line: &str) -> bool {
    let cols: Vec<String> = line
        .split(',')
        .map(|c| c.trim().to_ascii_lowercase())
        .collect();
    cols.len() == 2 && cols[0] == "x" && cols[1] == "y"
}

fn parse_row(line: &str) -> Option<Point> {
    let mut cols = line.split(',');
    let x = cols.next()?.trim().parse::<i64>().ok()?;
    let y = cols.next()?.trim().parse::<i64>().ok()?;
    if cols.next().is_some() {
        return None;
    }
    Some(Point::new(x as f64, y as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_in_order() {
        let pts = parse_points("x,y\n4,4\n 4 , 7\n\n6,5\n").unwrap();
        assert_eq!(
            pts,
            vec![Point::new(4.0, 4.0), Point::new(4.0, 7.0), Point::new(6.0, 5.0)]
        );
    }

    #[test]
    fn header_is_required() {
        assert_eq!(parse_points("4,4\n5,5"), Err(DiagramError::MissingHeader));
        assert_eq!(parse_points(""), Err(DiagramError::MissingHeader));
    }

    #[test]
    fn header_only_is_empty() {
        assert_eq!(parse_points("X, Y\n\n"), Err(DiagramError::EmptyInput));
    }

    #[test]
    fn malformed_row_reports_line() {
        let err = parse_points("x,y\n1,2\n3\n4,5").unwrap_err();
        assert_eq!(
            err,
            DiagramError::MalformedRow {
                line: 3,
                content: "3".to_string()
            }
        );
        assert!(matches!(
            parse_points("x,y\n1.5,2"),
            Err(DiagramError::MalformedRow { line: 2, .. })
        ));
        assert!(matches!(
            parse_points("x,y\n1,2,3"),
            Err(DiagramError::MalformedRow { .. })
        ));
    }
}
