use crate::models::{Dish, Drink};

/// Short templated rationale for pairing `drink` with `dish`
///
/// Leads with the drink's first flavour descriptor; falls back to the drink
/// type when the notes are blank so the sentence is never empty.
pub fn explain(drink: &Drink, dish: &Dish) -> String {
    let note = drink
        .lead_flavour_note()
        .unwrap_or_else(|| drink.drink_type.trim().to_lowercase());
    let dish_name = dish.as_str().trim();

    if drink.is_alcoholic() {
        format!(
            "With its {} character, {} complements {} beautifully. A classic British pairing!",
            note, drink.name, dish_name
        )
    } else {
        format!(
            "With its {} character, {} refreshes the palate between bites of {}. A classic British pairing without the alcohol!",
            note, drink.name, dish_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drink(name: &str, abv: &str, flavour_notes: &str) -> Drink {
        Drink {
            id: 1,
            name: name.to_string(),
            drink_type: "Soft Drink".to_string(),
            flavour_notes: flavour_notes.to_string(),
            region: "Somerset".to_string(),
            abv: abv.to_string(),
            recommended_foods: "Curry".to_string(),
            affiliate_link: "https://example.com".to_string(),
            description: "Test".to_string(),
            image_url: None,
        }
    }

    #[test]
    fn test_alcoholic_phrasing() {
        let dish = Dish::parse(Some("Fish and Chips")).unwrap();
        let text = explain(&drink("Fuller's London Pride", "4.7%", "Marmalade citrus, rich malt"), &dish);
        assert_eq!(
            text,
            "With its marmalade citrus character, Fuller's London Pride complements Fish and Chips beautifully. A classic British pairing!"
        );
    }

    #[test]
    fn test_non_alcoholic_phrasing() {
        let dish = Dish::parse(Some("Chicken Tikka Masala")).unwrap();
        let text = explain(&drink("Fentimans Ginger Beer", "0%", "Fiery ginger, lemon"), &dish);
        assert!(text.contains("refreshes"));
        assert!(text.contains("fiery ginger"));
        assert!(text.contains("Chicken Tikka Masala"));
    }

    #[test]
    fn test_blank_notes_fall_back_to_type() {
        let dish = Dish::parse(Some("Curry")).unwrap();
        let text = explain(&drink("Mystery", "0%", " "), &dish);
        assert!(text.contains("soft drink character"));
    }
}
