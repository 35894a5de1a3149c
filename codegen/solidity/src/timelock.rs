use govgen_config::{GovernanceConfig, TimelockType};

use crate::{
    docs,
    mixin::{Composition, Hook, VariantFragment},
    writer::{FunctionDecl, Signature, Writer},
    CodeGenerator, CodegenError, Contract, ResolvedAxes, VariantResolver,
};

/// Stale window of a queued transaction, as emitted in the contract.
pub const GRACE_PERIOD: &str = "14 days";

/// Upper bound of a queued-style delay, in seconds.
pub const MAXIMUM_DELAY_SECONDS: u64 = 30 * 86_400;

const SECONDS_PER_DAY: u64 = 86_400;

/// Emits the timelock contract. Produces nothing when the configuration requests no timelock.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimelockEmitter;

impl CodeGenerator for TimelockEmitter {
    type Output = Option<Contract>;

    fn generate(&self, config: &GovernanceConfig) -> Result<Self::Output, CodegenError> {
        let axes = VariantResolver::new(config).resolve_all();
        self.emit(config, &axes)
    }
}

impl TimelockEmitter {
    pub fn emit(
        &self,
        config: &GovernanceConfig,
        axes: &ResolvedAxes,
    ) -> Result<Option<Contract>, CodegenError> {
        let contract = match config.timelock {
            TimelockType::None => return Ok(None),
            TimelockType::Controller => controller(config, axes),
            TimelockType::Queued => queued(config, axes)?,
        };
        log::debug!("emitted timelock {}", contract.name);
        Ok(Some(contract))
    }
}

pub fn timelock_contract_name(config: &GovernanceConfig) -> String {
    format!("{}Timelock", config.identity.contract_prefix())
}

fn authorize_upgrade(writer: &mut Writer, composition: &Composition, modifier: &str) {
    if let Some(o) = composition.override_for(Hook::AuthorizeUpgrade) {
        let decl = Signature::new("address newImplementation", "newImplementation", "internal")
            .declare(o.hook.name())
            .overriding(o.clause())
            .modifier(modifier);
        writer.function(&decl, &[]);
    }
}

fn deployment_notes(writer: &mut Writer, config: &GovernanceConfig) {
    let delay = config.min_timelock_delay;
    let admin = config.admin.as_ref().map_or("deployer".to_string(), ToString::to_string);
    let treasury = config
        .treasury
        .as_ref()
        .map_or("multi-sig wallet".to_string(), ToString::to_string);

    writer.blank();
    writer.comment("Deployment script should include:");
    writer.comment("1. Deploy token");
    writer.comment(format!(
        "2. Deploy timelock with appropriate delay ({delay} seconds = {} days)",
        delay / SECONDS_PER_DAY
    ));
    writer.comment(format!("3. Setup admin={admin}, treasury={treasury}"));
    writer.comment("4. Deploy governance with token and timelock");
}

// CONTROLLER STYLE
// ================================================================================================

fn controller(config: &GovernanceConfig, axes: &ResolvedAxes) -> Contract {
    let composition = Composition::new(axes.flavor)
        .with(&axes.timelock_base)
        .with(&axes.upgrade);
    let name = timelock_contract_name(config);
    let delay = config.min_timelock_delay;

    let mut writer = Writer::new();
    writer.header(&config.identity.license);
    composition.write_imports(&mut writer);
    writer.blank();
    writer.natspec(&docs::preamble(
        &config.identity,
        format!("{} Timelock Controller", config.identity.name),
        vec![format!(
            "@dev Intended minimum delay: {delay} seconds (~{})",
            docs::approximate_duration(delay)
        )],
    ));
    writer.open_contract(&name, composition.declaration(&name));
    composition.write_setup(&mut writer, &[]);
    authorize_upgrade(&mut writer, &composition, "onlyRole(DEFAULT_ADMIN_ROLE)");
    writer.end();
    deployment_notes(&mut writer, config);

    Contract::new(name, writer.into_code())
}

// QUEUED STYLE
// ================================================================================================

const TRANSACTION_PARAMS: [&str; 5] = [
    "address target",
    "uint256 value",
    "string memory signature",
    "bytes memory data",
    "uint256 eta",
];

const HASH_TRANSACTION: &str =
    "bytes32 txHash = keccak256(abi.encode(target, value, signature, data, eta));";

fn queued(config: &GovernanceConfig, axes: &ResolvedAxes) -> Result<Contract, CodegenError> {
    let delay = config.min_timelock_delay;
    if delay > MAXIMUM_DELAY_SECONDS {
        return Err(CodegenError::unsupported(
            "minTimelockDelay",
            format!(
                "a queued timelock delay cannot exceed {MAXIMUM_DELAY_SECONDS} seconds (30 days)"
            ),
        ));
    }

    let mut composition = Composition::new(axes.flavor).with(&axes.upgrade);
    composition.push(
        &VariantFragment::default()
            .with_param("uint256 _delay")
            .with_param("address _admin"),
    );
    let name = timelock_contract_name(config);

    let mut writer = Writer::new();
    writer.header(&config.identity.license);
    composition.write_imports(&mut writer);
    writer.blank();
    writer.natspec(&docs::preamble(
        &config.identity,
        format!("{} Queued Timelock", config.identity.name),
        vec![format!(
            "@dev Admin-operated transaction queue with a minimum delay of {delay} seconds (~{})",
            docs::approximate_duration(delay)
        )],
    ));
    writer.open_contract(&name, composition.declaration(&name));

    writer.lines(&[
        format!("uint256 public constant GRACE_PERIOD = {GRACE_PERIOD};"),
        format!("uint256 public constant MINIMUM_DELAY = {delay};"),
        "uint256 public constant MAXIMUM_DELAY = 30 days;".to_string(),
        String::new(),
        "address public admin;".to_string(),
        "uint256 public delay;".to_string(),
        String::new(),
        "mapping(bytes32 => bool) public queuedTransactions;".to_string(),
        String::new(),
        "event NewAdmin(address indexed newAdmin);".to_string(),
        "event NewDelay(uint256 indexed newDelay);".to_string(),
    ]);
    for event in ["QueueTransaction", "CancelTransaction", "ExecuteTransaction"] {
        writer.line(format!(
            "event {event}(bytes32 indexed txHash, address indexed target, uint256 value, string signature, bytes data, uint256 eta);"
        ));
    }
    writer.blank();

    writer.open_function("onlyAdmin", "modifier onlyAdmin()".to_string());
    writer.lines(&[
        "require(msg.sender == admin, \"Timelock: caller must be admin\");",
        "_;",
    ]);
    writer.end();
    writer.blank();

    composition.write_setup(
        &mut writer,
        &[
            "require(_delay >= MINIMUM_DELAY, \"Timelock: delay must exceed minimum delay\");"
                .to_string(),
            "require(_delay <= MAXIMUM_DELAY, \"Timelock: delay must not exceed maximum delay\");"
                .to_string(),
            String::new(),
            "delay = _delay;".to_string(),
            "admin = _admin;".to_string(),
        ],
    );

    writer.blank();
    writer.line("receive() external payable {}");

    writer.function(
        &FunctionDecl::new("setDelay", "uint256 _delay", "public").modifier("onlyAdmin"),
        &[
            "require(_delay >= MINIMUM_DELAY, \"Timelock: delay must exceed minimum delay\");"
                .to_string(),
            "require(_delay <= MAXIMUM_DELAY, \"Timelock: delay must not exceed maximum delay\");"
                .to_string(),
            "delay = _delay;".to_string(),
            String::new(),
            "emit NewDelay(delay);".to_string(),
        ],
    );

    // single-step handoff
    writer.function(
        &FunctionDecl::new("setAdmin", "address _admin", "public").modifier("onlyAdmin"),
        &[
            "admin = _admin;".to_string(),
            "emit NewAdmin(admin);".to_string(),
        ],
    );

    let params = TRANSACTION_PARAMS.join(", ");
    writer.function(
        &FunctionDecl::new("queueTransaction", &params, "public")
            .modifier("onlyAdmin")
            .returning("bytes32"),
        &[
            "require(eta >= block.timestamp + delay, \"Timelock: estimated execution time must satisfy delay\");"
                .to_string(),
            String::new(),
            HASH_TRANSACTION.to_string(),
            "queuedTransactions[txHash] = true;".to_string(),
            String::new(),
            "emit QueueTransaction(txHash, target, value, signature, data, eta);".to_string(),
            "return txHash;".to_string(),
        ],
    );

    writer.function(
        &FunctionDecl::new("cancelTransaction", &params, "public").modifier("onlyAdmin"),
        &[
            HASH_TRANSACTION.to_string(),
            "queuedTransactions[txHash] = false;".to_string(),
            String::new(),
            "emit CancelTransaction(txHash, target, value, signature, data, eta);".to_string(),
        ],
    );

    // the queued flag is cleared before the external call so the call cannot re-enter and
    // execute the same transaction twice; a failed call reverts the clear along with it
    writer.function(
        &FunctionDecl::new("executeTransaction", &params, "public")
            .with_mutability("payable")
            .modifier("onlyAdmin")
            .returning("bytes memory"),
        &[
            HASH_TRANSACTION.to_string(),
            "require(queuedTransactions[txHash], \"Timelock: transaction hasn't been queued\");"
                .to_string(),
            "require(block.timestamp >= eta, \"Timelock: transaction hasn't surpassed time lock\");"
                .to_string(),
            "require(block.timestamp <= eta + GRACE_PERIOD, \"Timelock: transaction is stale\");"
                .to_string(),
            String::new(),
            "queuedTransactions[txHash] = false;".to_string(),
            String::new(),
            "bytes memory callData;".to_string(),
            "if (bytes(signature).length == 0) {".to_string(),
            "    callData = data;".to_string(),
            "} else {".to_string(),
            "    callData = abi.encodePacked(bytes4(keccak256(bytes(signature))), data);"
                .to_string(),
            "}".to_string(),
            String::new(),
            "(bool success, bytes memory returnData) = target.call{value: value}(callData);"
                .to_string(),
            "require(success, \"Timelock: transaction execution reverted\");".to_string(),
            String::new(),
            "emit ExecuteTransaction(txHash, target, value, signature, data, eta);".to_string(),
            "return returnData;".to_string(),
        ],
    );

    authorize_upgrade(&mut writer, &composition, "onlyAdmin");
    writer.end();
    deployment_notes(&mut writer, config);

    Ok(Contract::new(name, writer.into_code()))
}
