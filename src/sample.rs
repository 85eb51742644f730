//! Reference documents that exercise every part of the document format.

use crate::body::{Body, Gender, Pal};
use crate::document::{Document, INTAKE_STANDARD};
use crate::errors::Result;
use crate::foods::Foods;
use crate::user_foods::UserDefinitionFoods;
use std::path::{Path, PathBuf};

pub const FIRST: &str = "test.json";
pub const SECOND: &str = "test_2.json";

pub fn body(days: u32) -> Body {
    Body::new()
        .age(19)
        .weight(53)
        .height(160)
        .gender(Gender::Male)
        .pal(Pal::Low)
        .days(days)
}

pub fn foods() -> Result<Foods> {
    Foods::new()
        .food("01001")
        .w(200)?
        .food("01002")
        .w([10, 20, 30])?
        .food("01003")
        .w(200)?
        .w(300)?
        .food("01004")
        .w(20)?
        .p(30)?
        .food("01004")
        .w(50)?
        .ppg(1)?
        .food("01004")
        .w(50)?
        .ppg(3)?
        .food("02001")
        .w(50)?
        .ir(true)?
        .food("u1")
        .food("u2")
        .c("テスト")?
        .food("u3")
        .c("テスト")
}

pub fn user_definition_foods() -> Result<UserDefinitionFoods> {
    UserDefinitionFoods::new()
        .food("1")
        .w(100)?
        .food("2")
        .w(0)?
        .data([("食品名", "2番目")])?
        .food("3")
        .w(200)?
        .data([("食品名", "3番目"), ("エネルギー", "100")])
}

/// Write both reference documents into `dir`: a two-day plan, and the same
/// plan for one day with every amount halved.
pub fn write_samples(dir: &Path) -> Result<Vec<PathBuf>> {
    let foods = foods()?;
    let udf = user_definition_foods()?;
    let first = dir.join(FIRST);
    let second = dir.join(SECOND);

    Document::new()
        .body(&body(2))
        .foods(&foods)
        .user_definition_foods(&udf)
        .name_list(INTAKE_STANDARD)
        .comb([3, 4, 5])
        .path(&first)
        .write()?;

    Document::new()
        .body(&body(1))
        .foods(&foods.scale(0.5))
        .user_definition_foods(&udf)
        .name_list(INTAKE_STANDARD)
        .comb([3, 4, 5])
        .path(&second)
        .write()?;

    Ok(vec![first, second])
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reference_foods() {
        let foods = foods().unwrap();
        assert_eq!(foods.len(), 13);
        let numbers = foods.lines().iter().map(|l| l.number.as_str()).collect::<Vec<_>>();
        assert_eq!(
            numbers,
            [
                "01001", "01002", "01002", "01002", "01003", "01003", "01004", "01004", "01004",
                "02001", "u1", "u2", "u3"
            ]
        );
        assert_eq!(foods.lines()[6].price, Some(30.0));
        assert_eq!(foods.lines()[7].price, Some(50.0));
        assert_eq!(foods.lines()[8].price, Some(150.0));
    }
}
