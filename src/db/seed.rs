use sqlx::PgPool;

use crate::{error::AppResult, models::NewDrink};

// Replace affiliate links with real ones before going live.

/// The British drinks seed set: 15 alcoholic, 7 non-alcoholic
pub fn seed_drinks() -> Vec<NewDrink> {
    vec![
        NewDrink {
            name: "Timothy Taylor's Landlord",
            drink_type: "ale",
            flavour_notes: "Full-bodied with a hoppy, slightly floral aroma and a biscuity malt backbone",
            region: "Yorkshire",
            abv: "4.3%",
            recommended_foods: "Roast beef, Steak pie, Cheese ploughman's",
            affiliate_link: "https://example.com/buy/timothy-taylors-landlord",
            description: "A classic Yorkshire pale ale, winner of multiple CAMRA awards. Known for its perfect balance of hop bitterness and malt sweetness.",
            image_url: None,
        },
        NewDrink {
            name: "Fuller's London Pride",
            drink_type: "ale",
            flavour_notes: "Marmalade citrus, rich malt with a dry, biscuity finish",
            region: "London",
            abv: "4.7%",
            recommended_foods: "Fish and chips, Bangers and mash, Sunday roast",
            affiliate_link: "https://example.com/buy/fullers-london-pride",
            description: "London's iconic amber ale with over 175 years of brewing heritage. A perfectly balanced pint with distinctive marmalade notes.",
            image_url: None,
        },
        NewDrink {
            name: "Aspall Suffolk Cyder",
            drink_type: "cider",
            flavour_notes: "Crisp apple with honeyed sweetness and a dry, refreshing finish",
            region: "East Anglia",
            abv: "5.5%",
            recommended_foods: "Pork dishes, Cheese, Light salads",
            affiliate_link: "https://example.com/buy/aspall-cyder",
            description: "A premium English cider crafted in Suffolk since 1728. Made from a blend of bittersweet and culinary apples.",
            image_url: None,
        },
        NewDrink {
            name: "Sipsmith London Dry Gin",
            drink_type: "gin",
            flavour_notes: "Juniper-forward with bright citrus, floral notes and a peppery warmth",
            region: "London",
            abv: "41.6%",
            recommended_foods: "Seafood, Light poultry, Cucumber dishes",
            affiliate_link: "https://example.com/buy/sipsmith-gin",
            description: "Handcrafted in London's first copper pot still for nearly 200 years. A perfectly balanced London Dry Gin.",
            image_url: None,
        },
        NewDrink {
            name: "Glenfiddich 12 Year Old",
            drink_type: "whisky",
            flavour_notes: "Fresh pear, subtle oak, butterscotch with a long smooth finish",
            region: "Speyside",
            abv: "40%",
            recommended_foods: "Smoked salmon, Dark chocolate, Aged cheese",
            affiliate_link: "https://example.com/buy/glenfiddich-12",
            description: "The world's most awarded single malt Scotch whisky. Matured in American and European oak casks.",
            image_url: None,
        },
        NewDrink {
            name: "Laphroaig 10 Year Old",
            drink_type: "whisky",
            flavour_notes: "Intensely peaty, smoky seaweed with hints of iodine and a long sweet finish",
            region: "Islay",
            abv: "40%",
            recommended_foods: "Oysters, Blue cheese, Smoked meats",
            affiliate_link: "https://example.com/buy/laphroaig-10",
            description: "A bold, smoky Islay single malt. The most richly flavoured of all Scotch whiskies.",
            image_url: None,
        },
        NewDrink {
            name: "Westons Vintage Cider",
            drink_type: "cider",
            flavour_notes: "Rich, oaky with toffee apple notes and a smooth, medium-dry finish",
            region: "Herefordshire",
            abv: "8.2%",
            recommended_foods: "Cheese board, Pork pie, Apple desserts",
            affiliate_link: "https://example.com/buy/westons-vintage",
            description: "A premium oak-aged cider from Herefordshire's finest apples. Aged for two years for exceptional depth.",
            image_url: None,
        },
        NewDrink {
            name: "Pusser's British Navy Rum",
            drink_type: "rum",
            flavour_notes: "Rich molasses, butterscotch, vanilla with warming spice notes",
            region: "London",
            abv: "54.5%",
            recommended_foods: "Jerk chicken, Spicy curries, Chocolate desserts",
            affiliate_link: "https://example.com/buy/pussers-rum",
            description: "The original British Royal Navy rum, blended to the Admiralty's specifications since 1655.",
            image_url: None,
        },
        NewDrink {
            name: "Nyetimber Classic Cuvée",
            drink_type: "wine",
            flavour_notes: "Toasted brioche, honey, citrus blossom with fine bubbles",
            region: "Sussex",
            abv: "12%",
            recommended_foods: "Oysters, Canapés, Celebration dishes",
            affiliate_link: "https://example.com/buy/nyetimber-classic",
            description: "England's finest sparkling wine, rivalling the best Champagnes. Grown on the chalk downs of Sussex.",
            image_url: None,
        },
        NewDrink {
            name: "Adnams Broadside",
            drink_type: "ale",
            flavour_notes: "Rich fruitcake, blackcurrant with a bittersweet malt finish",
            region: "East Anglia",
            abv: "6.3%",
            recommended_foods: "Game pie, Venison, Christmas pudding",
            affiliate_link: "https://example.com/buy/adnams-broadside",
            description: "A dark, rich ruby ale from the Suffolk coast. Named after the 1672 Battle of Sole Bay.",
            image_url: None,
        },
        NewDrink {
            name: "Cotswolds Dry Gin",
            drink_type: "gin",
            flavour_notes: "Fresh lavender, bay leaf, grapefruit with subtle spice",
            region: "Cotswolds",
            abv: "46%",
            recommended_foods: "Garden salads, Grilled fish, Mediterranean dishes",
            affiliate_link: "https://example.com/buy/cotswolds-gin",
            description: "An aromatic gin distilled with nine carefully considered botanicals from the heart of the Cotswolds.",
            image_url: None,
        },
        NewDrink {
            name: "Chapel Down Bacchus",
            drink_type: "wine",
            flavour_notes: "Elderflower, gooseberry, crisp green apple with mineral notes",
            region: "Kent",
            abv: "12.5%",
            recommended_foods: "Fresh seafood, Asparagus, Goat's cheese",
            affiliate_link: "https://example.com/buy/chapel-down-bacchus",
            description: "England's signature white grape, producing wines with distinctive aromatic character.",
            image_url: None,
        },
        NewDrink {
            name: "Black Sheep Best Bitter",
            drink_type: "ale",
            flavour_notes: "Dry and bitter with fruity esters, crisp hoppy character",
            region: "Yorkshire",
            abv: "3.8%",
            recommended_foods: "Yorkshire pudding, Shepherd's pie, Cheese",
            affiliate_link: "https://example.com/buy/black-sheep-bitter",
            description: "A traditional Yorkshire bitter brewed in Masham using the Yorkshire Square fermentation system.",
            image_url: None,
        },
        NewDrink {
            name: "Thatchers Gold",
            drink_type: "cider",
            flavour_notes: "Golden and smooth with a crisp, refreshing apple taste",
            region: "Somerset",
            abv: "4.8%",
            recommended_foods: "Ploughman's lunch, Pork chops, Light cheese",
            affiliate_link: "https://example.com/buy/thatchers-gold",
            description: "A refreshing medium-dry Somerset cider made from a blend of British apples.",
            image_url: None,
        },
        NewDrink {
            name: "Hendrick's Gin",
            drink_type: "gin",
            flavour_notes: "Cucumber, rose petal, citrus with a smooth, rounded finish",
            region: "Scotland",
            abv: "41.4%",
            recommended_foods: "Cucumber sandwiches, Smoked salmon, Light appetizers",
            affiliate_link: "https://example.com/buy/hendricks-gin",
            description: "A distinctively delicious gin made with curious, yet perfectly balanced infusions of cucumber and rose.",
            image_url: None,
        },
        NewDrink {
            name: "Yorkshire Tea",
            drink_type: "tea",
            flavour_notes: "Malty, brisk and full-bodied with a robust finish",
            region: "Yorkshire",
            abv: "0%",
            recommended_foods: "Full English breakfast, Bacon sandwiches, Victoria sponge cake",
            affiliate_link: "https://example.com/buy/yorkshire-tea",
            description: "A proper brew blended by a family business in Harrogate since 1886.",
            image_url: None,
        },
        NewDrink {
            name: "Fever-Tree Tonic Water",
            drink_type: "soft drink",
            flavour_notes: "Crisp citrus, clean quinine bitterness with fine bubbles",
            region: "London",
            abv: "0%",
            recommended_foods: "Fish and chips, Seafood, Light salads",
            affiliate_link: "https://example.com/buy/fever-tree-tonic",
            description: "A premium tonic made with natural quinine and botanical oils. Refreshing on its own or over ice with lemon.",
            image_url: None,
        },
        NewDrink {
            name: "Fentimans Ginger Beer",
            drink_type: "soft drink",
            flavour_notes: "Fiery ginger, zesty lemon with warming spice",
            region: "Northumberland",
            abv: "0%",
            recommended_foods: "Spicy curries, Chicken tikka masala, Jerk chicken",
            affiliate_link: "https://example.com/buy/fentimans-ginger-beer",
            description: "Botanically brewed by a family firm since 1905 using fermented ginger root.",
            image_url: None,
        },
        NewDrink {
            name: "Twinings Earl Grey",
            drink_type: "tea",
            flavour_notes: "Fragrant bergamot, citrus and floral notes",
            region: "London",
            abv: "0%",
            recommended_foods: "Scones, Afternoon tea, Cucumber sandwiches",
            affiliate_link: "https://example.com/buy/twinings-earl-grey",
            description: "A classic black tea scented with bergamot, blended on the Strand since 1706.",
            image_url: None,
        },
        NewDrink {
            name: "Belvoir Elderflower Pressé",
            drink_type: "soft drink",
            flavour_notes: "Elderflower, floral, light and refreshing",
            region: "Leicestershire",
            abv: "0%",
            recommended_foods: "Garden salads, Goat's cheese, Summer desserts",
            affiliate_link: "https://example.com/buy/belvoir-elderflower",
            description: "Pressed from freshly picked elderflowers on an independent farm in the Vale of Belvoir.",
            image_url: None,
        },
        NewDrink {
            name: "Fentimans Curiosity Cola",
            drink_type: "soft drink",
            flavour_notes: "Herbal cola, ginger, vanilla with a dry finish",
            region: "Northumberland",
            abv: "0%",
            recommended_foods: "Burgers, Bangers and mash, Barbecue",
            affiliate_link: "https://example.com/buy/fentimans-curiosity-cola",
            description: "A botanically brewed cola with ginger and guarana.",
            image_url: None,
        },
        NewDrink {
            name: "Irn-Bru",
            drink_type: "soft drink",
            flavour_notes: "Sweet citrus, tutti-frutti with a gentle fizz",
            region: "Scotland",
            abv: "0%",
            recommended_foods: "Scotch pies, Haggis, Hangover fry-ups",
            affiliate_link: "https://example.com/buy/irn-bru",
            description: "Scotland's other national drink, made to a secret recipe since 1901.",
            image_url: None,
        },
    ]
}

/// Inserts the seed set when the drinks table is empty. Returns the number inserted.
pub async fn seed_database(pool: &PgPool) -> AppResult<usize> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM drinks")
        .fetch_one(pool)
        .await?;

    if existing > 0 {
        tracing::info!(existing, "Drinks table already populated, skipping seed");
        return Ok(0);
    }

    let drinks = seed_drinks();
    let mut tx = pool.begin().await?;
    for drink in &drinks {
        sqlx::query(
            r#"
            INSERT INTO drinks
                (name, type, flavour_notes, region, abv, recommended_foods, affiliate_link, description, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(drink.name)
        .bind(drink.drink_type)
        .bind(drink.flavour_notes)
        .bind(drink.region)
        .bind(drink.abv)
        .bind(drink.recommended_foods)
        .bind(drink.affiliate_link)
        .bind(drink.description)
        .bind(drink.image_url)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    tracing::info!(count = drinks.len(), "Seeded British drinks");
    Ok(drinks.len())
}
