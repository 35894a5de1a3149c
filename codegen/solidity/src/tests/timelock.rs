use expect_test::expect;
use govgen_config::{Address, GovernanceConfig, TimelockType, Upgradeability};

use super::{config, function_body, override_table};
use crate::{CodeGenerator, TimelockEmitter};

fn timelock(timelock: TimelockType) -> GovernanceConfig {
    GovernanceConfig {
        timelock,
        ..config()
    }
}

fn timelock_code(config: &GovernanceConfig) -> String {
    TimelockEmitter.generate(config).unwrap().unwrap().code
}

#[test]
fn no_timelock_is_emitted_unless_requested() {
    assert_eq!(TimelockEmitter.generate(&config()).unwrap(), None);
}

#[test]
fn controller_timelock() {
    let code = timelock_code(&timelock(TimelockType::Controller));
    expect![[r#"
        // SPDX-License-Identifier: MIT
        pragma solidity ^0.8.22;

        import "@openzeppelin/contracts/governance/TimelockController.sol";

        /**
         * @title Acme DAO Timelock Controller
         * @dev Governance of the Acme DAO treasury
         * @dev Intended minimum delay: 172800 seconds (~2 days)
         * Purpose: Fund public goods
         */
        contract AcmeDAOTimelock is TimelockController {
            constructor(uint256 minDelay, address[] memory proposers, address[] memory executors, address admin)
                TimelockController(minDelay, proposers, executors, admin)
            {}
        }

        // Deployment script should include:
        // 1. Deploy token
        // 2. Deploy timelock with appropriate delay (172800 seconds = 2 days)
        // 3. Setup admin=deployer, treasury=multi-sig wallet
        // 4. Deploy governance with token and timelock
    "#]]
    .assert_eq(&code);
}

#[test]
fn upgradeable_controller_timelock() {
    let config = GovernanceConfig {
        upgradeability: Upgradeability::Uups,
        ..timelock(TimelockType::Controller)
    };
    let code = timelock_code(&config);
    assert!(code.contains(
        "contract AcmeDAOTimelock is Initializable, TimelockControllerUpgradeable, UUPSUpgradeable {"
    ));
    assert!(code.contains("__TimelockController_init(minDelay, proposers, executors, admin);"));
    expect![[r#"
        _authorizeUpgrade: UUPSUpgradeable
    "#]]
    .assert_eq(&override_table(&code));
    assert!(code.contains("onlyRole(DEFAULT_ADMIN_ROLE) {}"));
}

#[test]
fn queued_timelock_bounds_the_delay() {
    let code = timelock_code(&timelock(TimelockType::Queued));
    assert!(code.contains("contract AcmeDAOTimelock {"));
    assert!(code.contains("uint256 public constant GRACE_PERIOD = 14 days;"));
    assert!(code.contains("uint256 public constant MAXIMUM_DELAY = 30 days;"));

    let set_delay = function_body(&code, "setDelay");
    assert!(set_delay.contains("require(_delay >= MINIMUM_DELAY"));
    assert!(set_delay.contains("require(_delay <= MAXIMUM_DELAY"));

    let constructor = &code[code.find("constructor(uint256 _delay, address _admin) {").unwrap()..];
    assert!(constructor.find("require(_delay >= MINIMUM_DELAY").unwrap() < constructor.find("delay = _delay;").unwrap());
}

#[test]
fn queued_execution_consumes_the_transaction_before_calling_out() {
    let code = timelock_code(&timelock(TimelockType::Queued));
    let execute = function_body(&code, "executeTransaction");

    let queued = execute.find("require(queuedTransactions[txHash]").unwrap();
    let ready = execute.find("require(block.timestamp >= eta").unwrap();
    let fresh = execute.find("require(block.timestamp <= eta + GRACE_PERIOD").unwrap();
    let cleared = execute.find("queuedTransactions[txHash] = false;").unwrap();
    let call = execute.find("target.call{value: value}(callData)").unwrap();
    assert!(queued < cleared && ready < cleared && fresh < cleared);
    assert!(cleared < call);

    // a failed call reverts the whole execution, clear included
    let reverted = execute.find("require(success, \"Timelock: transaction execution reverted\");").unwrap();
    assert!(call < reverted);
}

#[test]
fn queued_entry_points_are_admin_only() {
    let code = timelock_code(&timelock(TimelockType::Queued));
    for function in [
        "setDelay",
        "setAdmin",
        "queueTransaction",
        "cancelTransaction",
        "executeTransaction",
    ] {
        let body = function_body(&code, function);
        let head = body.lines().next().unwrap();
        assert!(head.contains(" onlyAdmin"), "{head}");
    }
    assert!(function_body(&code, "queueTransaction")
        .contains("require(eta >= block.timestamp + delay"));
    assert!(function_body(&code, "cancelTransaction").contains("queuedTransactions[txHash] = false;"));
}

#[test]
fn upgradeable_queued_timelock() {
    let config = GovernanceConfig {
        upgradeability: Upgradeability::Uups,
        ..timelock(TimelockType::Queued)
    };
    let code = timelock_code(&config);
    assert!(code.contains("contract AcmeDAOTimelock is Initializable, UUPSUpgradeable {"));
    expect![[r#"
        function initialize(uint256 _delay, address _admin) public initializer {
                __UUPSUpgradeable_init();

                require(_delay >= MINIMUM_DELAY, "Timelock: delay must exceed minimum delay");
                require(_delay <= MAXIMUM_DELAY, "Timelock: delay must not exceed maximum delay");

                delay = _delay;
                admin = _admin;"#]]
    .assert_eq(function_body(&code, "initialize"));
    assert!(code.contains(
        "function _authorizeUpgrade(address newImplementation) internal override(UUPSUpgradeable) onlyAdmin {}"
    ));
}

#[test]
fn delays_beyond_thirty_days_are_unsupported() {
    let mut config = timelock(TimelockType::Queued);
    config.min_timelock_delay = 2_592_000;
    assert!(TimelockEmitter.generate(&config).is_ok());

    config.min_timelock_delay = 2_592_001;
    let err = TimelockEmitter.generate(&config).unwrap_err();
    assert_eq!(err.field(), "minTimelockDelay");

    // the controller style leaves the delay to the deployer
    config.timelock = TimelockType::Controller;
    assert!(TimelockEmitter.generate(&config).is_ok());
}

#[test]
fn deployment_notes_name_the_configured_roles() {
    let admin: Address = "0x1111111111111111111111111111111111111111".parse().unwrap();
    let treasury: Address = "0x2222222222222222222222222222222222222222".parse().unwrap();
    let config = GovernanceConfig {
        admin: Some(admin),
        treasury: Some(treasury),
        min_timelock_delay: 86_400 * 3 + 5,
        ..timelock(TimelockType::Queued)
    };
    let code = timelock_code(&config);
    assert!(code.contains("// 2. Deploy timelock with appropriate delay (259205 seconds = 3 days)\n"));
    assert!(code.contains(
        "// 3. Setup admin=0x1111111111111111111111111111111111111111, treasury=0x2222222222222222222222222222222222222222\n"
    ));
    assert!(code.ends_with("// 4. Deploy governance with token and timelock\n"));
}
