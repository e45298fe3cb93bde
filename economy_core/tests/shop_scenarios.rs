use arsenal_core::{catalogs, ItemDef, ItemRarity, Modifier, Stat, WeaponTier};
use economy_core::{OfferKind, Run, Shop, ShopError};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use stat_core::{PlayerBuild, WeaponInstance};
use std::sync::Arc;

fn stim_pack(price: u32) -> Arc<ItemDef> {
    Arc::new(ItemDef {
        id: "stim_pack".to_string(),
        name: "Stim Pack".to_string(),
        rarity: ItemRarity::Uncommon,
        unique: false,
        price,
        modifiers: vec![
            Modifier::new(Stat::MaxHp, 10),
            Modifier::new(Stat::MoveSpeedPct, 5),
        ],
        shop_effect: None,
    })
}

#[test]
fn reroll_then_buy_charges_exact_gold() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut shop = Shop::default();
    let mut build = PlayerBuild::default().with_gold(50);

    shop.begin_intermission_with_rng(&build, &mut rng);
    assert_eq!(shop.reroll_cost(), 6);

    assert_eq!(shop.reroll_with_rng(&mut build, &mut rng).unwrap(), 6);
    assert_eq!(build.gold(), 44);
    assert_eq!(shop.reroll_cost(), 10);

    let id = shop.insert_offer(OfferKind::Passive(stim_pack(20)));
    let index = shop.offers().iter().position(|o| o.id == id).unwrap();
    let purchase = shop.buy(index, &mut build).unwrap();

    assert_eq!(purchase.price, 20);
    assert_eq!(build.gold(), 24);
    assert!(shop.offers().iter().all(|o| o.id != id));
    assert_eq!(build.passives.get(Stat::MaxHp), 10);
    assert_eq!(build.passives.get(Stat::MoveSpeedPct), 5);
    assert_eq!(build.effective().max_hp, 110);
}

#[test]
fn second_common_pulse_core_combines() {
    let cat = catalogs();
    let pulse = cat.weapon("pulse_core").unwrap().clone();
    let mut shop = Shop::default();
    let mut build = PlayerBuild::default().with_gold(100);
    build
        .loadout
        .try_add_or_combine(WeaponInstance::new(pulse.clone(), WeaponTier::Common))
        .unwrap();

    shop.insert_offer(OfferKind::Weapon {
        def: pulse,
        tier: WeaponTier::Common,
    });
    let purchase = shop.buy(0, &mut build).unwrap();

    let placement = purchase.placement.unwrap();
    assert_eq!(placement.merges, 1);
    assert_eq!(build.loadout.len(), 1);
    let held = &build.loadout.slots()[0];
    assert_eq!(held.def.id, "pulse_core");
    assert_eq!(held.tier, WeaponTier::Uncommon);
    assert!(build
        .loadout
        .slots()
        .iter()
        .all(|w| w.tier != WeaponTier::Common));
    assert_eq!(build.gold(), 90);
}

#[test]
fn lock_carries_into_next_intermission_once() {
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let mut run = Run::default();
    run.award_gold(500);
    run.enter_shop_with_rng(&mut rng);

    let kept = run.shop.offers()[1].id;
    run.shop.toggle_lock(1).unwrap();

    // Survives a reroll of the same rotation, then the lock is gone
    run.shop.reroll_with_rng(&mut run.build, &mut rng).unwrap();
    assert_eq!(run.shop.offers()[1].id, kept);
    assert!(!run.shop.is_locked(kept));

    // Locked again and carried into the next wave's shop
    run.shop.toggle_lock(1).unwrap();
    run.start_next_wave();
    run.enter_shop_with_rng(&mut rng);
    let appearances = run.shop.offers().iter().filter(|o| o.id == kept).count();
    assert_eq!(appearances, 1);
    assert!(!run.shop.is_locked(kept));

    run.start_next_wave();
    run.enter_shop_with_rng(&mut rng);
    assert!(run.shop.offers().iter().all(|o| o.id != kept));
}

#[test]
fn reroll_cost_resets_each_wave() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut run = Run::default();
    run.award_gold(200);
    run.enter_shop_with_rng(&mut rng);

    for expected in [6, 10, 14] {
        assert_eq!(run.shop.reroll_with_rng(&mut run.build, &mut rng).unwrap(), expected);
    }
    assert_eq!(run.shop.reroll_cost(), 18);

    run.start_next_wave();
    run.enter_shop_with_rng(&mut rng);
    assert_eq!(run.shop.reroll_cost(), 6);
    assert_eq!(run.shop.rerolls_this_phase(), 0);
}

#[test]
fn purchased_unique_stays_out_of_the_run() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let cat = catalogs();
    let mut run = Run::default();
    run.award_gold(1_000);

    let unique = cat.item("u_probability_engine").unwrap().clone();
    run.shop.insert_offer(OfferKind::Passive(unique.clone()));
    run.shop.buy(0, &mut run.build).unwrap();
    assert!(run.shop.is_unique_bought("u_probability_engine"));

    for _ in 0..100 {
        run.start_next_wave();
        run.enter_shop_with_rng(&mut rng);
        assert!(run
            .shop
            .offers()
            .iter()
            .all(|o| o.unique_item_id() != Some("u_probability_engine")));
    }

    run.shop.insert_offer(OfferKind::Passive(unique));
    let last = run.shop.offers().len() - 1;
    assert_eq!(
        run.shop.buy(last, &mut run.build).unwrap_err(),
        ShopError::UniqueOwned("u_probability_engine".to_string())
    );
}

#[test]
fn invalid_indices_are_refused() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut run = Run::default();
    run.award_gold(30);
    run.enter_shop_with_rng(&mut rng);
    let len = run.shop.offers().len();

    assert_eq!(
        run.shop.buy(len, &mut run.build).unwrap_err(),
        ShopError::InvalidIndex { index: len, len }
    );
    assert!(run.shop.preview(usize::MAX, &run.build).is_err());
    assert_eq!(
        run.shop.sell(0, &mut run.build).unwrap_err(),
        ShopError::InvalidSlot { index: 0, len: 0 }
    );
    assert_eq!(run.build.gold(), 30);
    assert_eq!(run.shop.offers().len(), len);
}

#[test]
fn run_reset_clears_run_state() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let cat = catalogs();
    let mut run = Run::default();
    run.award_gold(300);

    run.shop
        .insert_offer(OfferKind::Passive(cat.item("salvage_protocol").unwrap().clone()));
    run.shop.buy(0, &mut run.build).unwrap();
    assert_eq!(run.shop.price_discount_pct(), 15);

    run.award_xp(20);
    assert_eq!(run.progression.level(), 2);
    assert!(run.accept_level_up());

    run.enter_shop_with_rng(&mut rng);
    run.shop.toggle_lock(0).unwrap();
    run.start_next_wave();

    run.reset();
    assert_eq!(run.wave(), 1);
    assert_eq!(run.build.gold(), 0);
    assert!(run.build.passives.is_empty());
    assert!(run.build.loadout.is_empty());
    assert_eq!(run.shop.price_discount_pct(), 0);
    assert_eq!(run.shop.reroll_cost(), 6);
    assert!(run.shop.offers().is_empty());
    assert_eq!(run.progression.level(), 1);
}

#[test]
fn views_serialize_for_the_render_layer() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let mut run = Run::default();
    run.enter_shop_with_rng(&mut rng);

    let json = run.shop.views_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let offers = value.as_array().unwrap();
    assert_eq!(offers.len(), 4);
    for offer in offers {
        assert!(offer["price"].as_u64().unwrap() >= 1);
        assert!(offer["title"].as_str().is_some());
        assert!(offer["modifiers"].is_array());
    }
}
