// End-to-end scenarios for pasted item text.
use statfill::model::{FamilyEntry, ParsedStat};
use statfill::{ApplyError, FilterController, PipelineOptions};

const DAGGER: &str = "Item Class: Daggers\n34% increased Projectile Speed\nAdds 10 to 16 Physical Damage\n+12 to Dexterity\nRarity: Rare\n";

#[test]
fn test_dagger_without_options() {
    let set = FilterController::default().build(DAGGER).unwrap();

    assert_eq!(set.item_class.as_deref(), Some("Dagger"));
    assert_eq!(
        set.stats,
        vec![
            ParsedStat::new("# increased Projectile Speed", Some(34.0)),
            ParsedStat::new("Adds # to # Physical Damage", Some(10.0)),
            ParsedStat::new("+# to Dexterity", Some(12.0)),
        ]
    );
    assert!(set.attributes.is_empty());
    assert!(set.resistances.is_empty());
}

#[test]
fn test_dagger_with_attribute_grouping() {
    let controller = FilterController::new(PipelineOptions {
        group_attributes: true,
        ..Default::default()
    });
    let set = controller.build(DAGGER).unwrap();

    assert_eq!(set.stats.len(), 2);
    assert_eq!(set.stats[0].template, "# increased Projectile Speed");
    assert_eq!(set.stats[1].template, "Adds # to # Physical Damage");
    assert_eq!(set.attributes.len(), 1);
    let entry = &set.attributes["+# to ATTRIBUTES"];
    assert_eq!(entry, &FamilyEntry::new("+# to ATTRIBUTES", Some(12.0)));
    assert_eq!(entry.count, 1);
    assert_eq!(set.filter_count(), 3);
}

#[test]
fn test_header_and_labels_only() {
    let text = "Item Class: Rings\nRarity: Unique\nRequires: Level 30\nItem Level: 84";
    assert_eq!(
        FilterController::default().build(text),
        Err(ApplyError::NoValidStats)
    );
}

#[test]
fn test_blank_paste() {
    assert_eq!(
        FilterController::default().build("  \n \n"),
        Err(ApplyError::EmptyInput)
    );
    assert_eq!(ApplyError::EmptyInput.to_string(), "Please paste the item text.");
    assert_eq!(
        ApplyError::NoValidStats.to_string(),
        "No valid stats found in the text."
    );
}

#[test]
fn test_markup_is_stripped_before_parsing() {
    let text = "Item Class: Wands\n[Spell|Spell] Damage is Lucky\n40% increased [ElementalDamage|Elemental Damage]\nAdds 2 to 30 [Lightning] Damage";
    let set = FilterController::default().build(text).unwrap();
    assert_eq!(
        set.stats,
        vec![
            ParsedStat::new("Spell Damage is Lucky", None),
            ParsedStat::new("# increased Elemental Damage", Some(40.0)),
            ParsedStat::new("Adds # to # Lightning Damage", Some(2.0)),
        ]
    );
    assert_eq!(set.item_class.as_deref(), Some("Wand"));
}

#[test]
fn test_all_options_together() {
    let text = "\
Item Class: Helmets
+20 to Strength
+31 to Intelligence
+35% to Fire Resistance
+28% to Cold Resistance
+13% to Chaos Resistance
+75 to maximum Life
Corrupted";
    let controller = FilterController::new(PipelineOptions {
        buffer: Some(statfill::model::BufferPercent::new(10.0).unwrap()),
        group_attributes: true,
        group_resistances: true,
        clear_before_apply: false,
    });
    let set = controller.build(text).unwrap();

    assert_eq!(
        set.stats,
        vec![
            ParsedStat::new("+# to Chaos Resistance", Some(12.0)), // 11.7
            ParsedStat::new("+# to maximum Life", Some(68.0)), // 67.5
            ParsedStat::new("Corrupted", None),
        ]
    );
    let attrs = &set.attributes["+# to ATTRIBUTES"];
    assert_eq!((attrs.count, attrs.magnitude), (2, Some(18.0)));
    let resists = &set.resistances["+# to ELEMENTAL_RESIST Resistance"];
    assert_eq!((resists.count, resists.magnitude), (2, Some(25.0))); // 25.2
    assert_eq!(set.item_class.as_deref(), Some("Helmet"));
}

#[test]
fn test_build_is_deterministic() {
    let controller = FilterController::new(PipelineOptions {
        group_attributes: true,
        group_resistances: true,
        ..Default::default()
    });
    let text = "Item Class: Amulets\n+10 to Dexterity\n+12% to Lightning Resistance\n+8 to Strength\n+17% to Fire Resistance\nGain 3 Life per Enemy Hit";
    let first = serde_json::to_string(&controller.build(text).unwrap()).unwrap();
    let second = serde_json::to_string(&controller.build(text).unwrap()).unwrap();
    assert_eq!(first, second);
}
