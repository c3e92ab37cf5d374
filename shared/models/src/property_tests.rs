//! Property-based tests for the BoQ domain models
//!
//! Checks that quantities are written exactly as the sheet holds them and
//! that row normalization is stable.

use proptest::prelude::*;

use crate::{format_number, GroupContext, InputRow, Quantity, TaskRecord};

prop_compose! {
    fn arb_sub_code()(
        head in 1..100u32,
        tail in prop::collection::vec(1..50u32, 0..3),
        suffix in prop::option::of("[a-z]")
    ) -> String {
        let mut code = head.to_string();
        for part in tail {
            code.push('.');
            code.push_str(&part.to_string());
        }
        if let Some(letter) = suffix {
            code.push_str(&letter);
        }
        code
    }
}

proptest! {
    #[test]
    fn prop_integral_quantities_render_without_fraction(value in -1_000_000i64..1_000_000i64) {
        let rendered = format_number(value as f64);
        prop_assert!(!rendered.contains('.'));
        prop_assert_eq!(rendered, value.to_string());
    }

    #[test]
    fn prop_text_quantity_renders_verbatim(raw in "[0-9.,]{1,8}|[A-Za-zà-ỹ ]{1,12}") {
        let quantity = Quantity::from_text(&raw);
        prop_assert_eq!(quantity.to_string(), raw.trim());
    }

    #[test]
    fn prop_input_row_normalization_is_stable(
        sub_code in arb_sub_code(),
        description in "[A-Za-zÀ-ỹ ]{0,30}",
        unit in "[a-z0-9]{0,4}",
        padding in "[ \t]{0,3}"
    ) {
        let row = InputRow::new(
            2,
            format!("{padding}{sub_code}{padding}"),
            format!("{padding}{description}"),
            format!("{unit}{padding}"),
            Quantity::Empty,
        );
        let again = InputRow::new(
            2,
            &row.sequence_id,
            &row.description,
            &row.unit,
            Quantity::Empty,
        );

        prop_assert_eq!(&row, &again);
        prop_assert_eq!(row.sequence_id, sub_code);
    }

    #[test]
    fn prop_task_record_inherits_group(
        code in "[0-9]{1,3}",
        name in "[A-Za-z ]{1,20}",
        sub_code in arb_sub_code()
    ) {
        let group = GroupContext::new(code.clone(), name.clone());
        let row = InputRow::new(5, &sub_code, "Task", "m3", Quantity::Number(1.0));
        let record = TaskRecord::from_row(&group, &row);

        prop_assert_eq!(record.group_code, code);
        prop_assert_eq!(record.group_name, name);
        prop_assert_eq!(record.sub_code, sub_code);
    }
}
