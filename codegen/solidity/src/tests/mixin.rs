use govgen_config::{ClockMode, TimelockType, Upgradeability, VotesType};
use pretty_assertions::assert_eq;

use super::config;
use crate::{
    Axis, AxisValue, Composition, Flavor, Hook, Mixin, TokenKind, VariantFragment,
    VariantResolver,
};

fn mixin(base: &str, hooks: &[Hook]) -> Mixin {
    Mixin::fixed(base, format!("lib/{base}.sol"), hooks)
}

#[test]
fn single_declarer_is_only_overridden_when_required() {
    let composition = Composition::new(Flavor::Standard)
        .with(&VariantFragment::mixin(mixin("A", &[Hook::Burn, Hook::Mint])));
    assert!(composition.overrides().is_empty());

    let composition = composition.with(&VariantFragment::default().requiring(&[Hook::Mint]));
    let overrides = composition.overrides();
    assert_eq!(overrides.len(), 1);
    assert_eq!(overrides[0].hook, Hook::Mint);
    assert_eq!(overrides[0].clause(), "override(A)");
}

#[test]
fn contested_hooks_list_every_declarer_in_inheritance_order() {
    let composition = Composition::new(Flavor::Standard)
        .with(&VariantFragment::mixin(mixin("A", &[Hook::Burn, Hook::TokenUri])))
        .with(&VariantFragment::mixin(mixin("B", &[Hook::Mint])))
        .with(&VariantFragment::mixin(mixin("C", &[Hook::Burn])));

    assert_eq!(composition.override_targets(Hook::Burn), ["A", "C"]);
    assert_eq!(composition.override_targets(Hook::Mint), ["B"]);
    let hooks: Vec<Hook> = composition.overrides().iter().map(|o| o.hook).collect();
    assert_eq!(hooks, [Hook::Burn]);
}

#[test]
fn foundations_come_first_and_bases_are_not_duplicated() {
    let composition = Composition::new(Flavor::Upgradeable)
        .with(&VariantFragment::mixin(mixin("A", &[])))
        .with(&VariantFragment::mixin(mixin("Root", &[]).as_foundation()))
        .with(&VariantFragment::mixin(mixin("A", &[])));
    assert_eq!(composition.bases(), ["Root", "A"]);
    assert_eq!(composition.imports(), ["lib/Root.sol", "lib/A.sol"]);
    assert_eq!(composition.declaration("X"), "contract X is Root, A");
}

#[test]
#[should_panic(expected = "no active base declares it")]
fn requiring_an_undeclared_hook_is_a_defect() {
    let composition = Composition::new(Flavor::Standard)
        .with(&VariantFragment::mixin(mixin("A", &[Hook::Burn])).requiring(&[Hook::Decimals]));
    composition.overrides();
}

#[test]
fn flavor_names_library_contracts() {
    let standard = Mixin::library(Flavor::Standard, "access", "AccessControl", &[]);
    assert_eq!(standard.base, "AccessControl");
    assert_eq!(standard.import, "@openzeppelin/contracts/access/AccessControl.sol");

    let upgradeable = Mixin::library(Flavor::Upgradeable, "access", "AccessControl", &[]);
    assert_eq!(upgradeable.base, "AccessControlUpgradeable");
    assert_eq!(
        upgradeable.import,
        "@openzeppelin/contracts-upgradeable/access/AccessControlUpgradeable.sol"
    );
    assert_eq!(Flavor::from(Upgradeability::Transparent), Flavor::Upgradeable);
    assert_eq!(Flavor::from(Upgradeability::None), Flavor::Standard);
}

#[test]
fn obligations_use_the_inherited_name() {
    let config = govgen_config::GovernanceConfig {
        upgradeability: Upgradeability::Uups,
        ..config()
    };
    let resolver = VariantResolver::new(&config);
    for value in [
        AxisValue::Token(TokenKind::New(VotesType::Fungible)),
        AxisValue::Token(TokenKind::New(VotesType::NonFungible)),
        AxisValue::Timelock(TimelockType::Controller),
        AxisValue::Timelock(TimelockType::Queued),
        AxisValue::Upgrade(Upgradeability::Uups),
    ] {
        let fragment = resolver.resolve(value);
        for (hook, base) in fragment.obligations() {
            assert!(
                fragment.mixins.iter().any(|m| m.base == base && m.declares(hook)),
                "{value:?}: {} -> {base}",
                hook.name()
            );
            assert!(base.ends_with("Upgradeable"), "{base}");
        }
        for hook in &fragment.required {
            assert!(fragment.obligations().any(|(declared, _)| declared == *hook));
        }
    }
}

#[test]
fn resolver_is_total() {
    let config = config();
    let resolver = VariantResolver::new(&config);
    let values = TokenKind::ALL
        .iter()
        .map(|kind| AxisValue::Token(*kind))
        .chain(ClockMode::ALL.iter().map(|mode| AxisValue::Clock(*mode)))
        .chain(TimelockType::ALL.iter().map(|t| AxisValue::Timelock(*t)))
        .chain(Upgradeability::ALL.iter().map(|u| AxisValue::Upgrade(*u)));
    for value in values {
        // every value resolves, and none leaks an undeclared requirement
        let fragment = resolver.resolve(value);
        let composition = Composition::new(resolver.flavor()).with(&fragment);
        if !fragment.required.is_empty() && !fragment.mixins.is_empty() {
            composition.overrides();
        }
    }
}

#[test]
fn axis_values_parse_from_their_field_names() {
    assert_eq!(
        AxisValue::parse(Axis::Timelock, "QueuedStyle"),
        Ok(AxisValue::Timelock(TimelockType::Queued))
    );
    assert_eq!(
        AxisValue::parse(Axis::Token, "ExistingNonFungibleVotes"),
        Ok(AxisValue::Token(TokenKind::Existing(VotesType::NonFungible)))
    );
    assert_eq!(
        AxisValue::parse(Axis::Token, "ERC20Votes"),
        Ok(AxisValue::Token(TokenKind::New(VotesType::Fungible)))
    );
    assert_eq!(
        AxisValue::parse(Axis::Upgrade, "UUPS").map(|value| value.axis()),
        Ok(Axis::Upgrade)
    );

    let err = AxisValue::parse(Axis::Timelock, "Sometimes").unwrap_err();
    assert_eq!(err.field, "timelockType");
    let err = AxisValue::parse(Axis::Clock, "Slot").unwrap_err();
    assert_eq!(err.field, "tokenClockMode");

    for kind in TokenKind::ALL {
        assert_eq!(kind.to_string().parse::<TokenKind>(), Ok(kind));
    }
}
