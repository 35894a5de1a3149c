use std::collections::BTreeSet;

use govgen_config::Upgradeability;

use crate::writer::Writer;

// HOOKS
// ================================================================================================

/// An overridable function that one or more base contracts declare.
///
/// The declaration order of the variants is the order in which overrides are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Hook {
    Decimals,
    Clock,
    ClockMode,
    BeforeTokenTransfer,
    AfterTokenTransfer,
    Mint,
    Burn,
    TokenUri,
    VotingDelay,
    VotingPeriod,
    Quorum,
    State,
    ProposalNeedsQueuing,
    Propose,
    ProposalThreshold,
    QueueOperations,
    ExecuteOperations,
    Cancel,
    Executor,
    SupportsInterface,
    AuthorizeUpgrade,
}

impl Hook {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Decimals => "decimals",
            Self::Clock => "clock",
            Self::ClockMode => "CLOCK_MODE",
            Self::BeforeTokenTransfer => "_beforeTokenTransfer",
            Self::AfterTokenTransfer => "_afterTokenTransfer",
            Self::Mint => "_mint",
            Self::Burn => "_burn",
            Self::TokenUri => "tokenURI",
            Self::VotingDelay => "votingDelay",
            Self::VotingPeriod => "votingPeriod",
            Self::Quorum => "quorum",
            Self::State => "state",
            Self::ProposalNeedsQueuing => "proposalNeedsQueuing",
            Self::Propose => "propose",
            Self::ProposalThreshold => "proposalThreshold",
            Self::QueueOperations => "_queueOperations",
            Self::ExecuteOperations => "_executeOperations",
            Self::Cancel => "_cancel",
            Self::Executor => "_executor",
            Self::SupportsInterface => "supportsInterface",
            Self::AuthorizeUpgrade => "_authorizeUpgrade",
        }
    }
}

// FLAVOR
// ================================================================================================

/// Selects between the plain contracts library and its proxy-compatible counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
    Standard,
    Upgradeable,
}

impl Flavor {
    const STANDARD_PACKAGE: &'static str = "@openzeppelin/contracts";
    const UPGRADEABLE_PACKAGE: &'static str = "@openzeppelin/contracts-upgradeable";

    pub fn is_upgradeable(&self) -> bool {
        matches!(self, Self::Upgradeable)
    }

    /// Returns the name of `unit` in this flavor.
    pub fn type_name(&self, unit: &str) -> String {
        match self {
            Self::Standard => unit.to_string(),
            Self::Upgradeable => format!("{unit}Upgradeable"),
        }
    }

    /// Returns the import path of `unit`, which lives in `dir` of the contracts package.
    pub fn import_path(&self, dir: &str, unit: &str) -> String {
        match self {
            Self::Standard => format!("{}/{dir}/{unit}.sol", Self::STANDARD_PACKAGE),
            Self::Upgradeable => format!("{}/{dir}/{unit}Upgradeable.sol", Self::UPGRADEABLE_PACKAGE),
        }
    }
}

impl From<Upgradeability> for Flavor {
    fn from(upgradeability: Upgradeability) -> Self {
        if upgradeability.is_upgradeable() {
            Self::Upgradeable
        } else {
            Self::Standard
        }
    }
}

// MIXINS
// ================================================================================================

/// A base constructor invocation, or the equivalent initializer call in the upgradeable flavor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupCall {
    pub unit: &'static str,
    pub args: Vec<String>,
}

impl SetupCall {
    pub fn new(unit: &'static str, args: Vec<String>) -> Self {
        Self { unit, args }
    }

    /// Renders the call as a constructor modifier, or `None` if the base takes no arguments and
    /// the modifier can be omitted.
    pub fn as_modifier(&self) -> Option<String> {
        if self.args.is_empty() {
            None
        } else {
            Some(format!("{}({})", self.unit, self.args.join(", ")))
        }
    }

    pub fn as_initializer(&self) -> String {
        format!("__{}_init({});", self.unit, self.args.join(", "))
    }
}

/// A composable base contract.
///
/// `base` is the only place a base contract name is spelled: the inheritance list and every
/// override-target list read it from here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mixin {
    pub base: String,
    pub import: String,
    pub hooks: BTreeSet<Hook>,
    pub setup: Vec<SetupCall>,
    /// Foundational bases are inherited by every other base and must be listed first.
    pub foundation: bool,
}

impl Mixin {
    /// A library contract `unit` found in `dir`, named according to `flavor`.
    pub fn library(flavor: Flavor, dir: &str, unit: &str, hooks: &[Hook]) -> Self {
        Self::fixed(flavor.type_name(unit), flavor.import_path(dir, unit), hooks)
    }

    /// A contract whose name does not change between flavors.
    pub fn fixed(base: impl Into<String>, import: impl Into<String>, hooks: &[Hook]) -> Self {
        Self {
            base: base.into(),
            import: import.into(),
            hooks: hooks.iter().copied().collect(),
            setup: Vec::new(),
            foundation: false,
        }
    }

    pub fn with_setup(mut self, unit: &'static str, args: Vec<String>) -> Self {
        self.setup.push(SetupCall::new(unit, args));
        self
    }

    pub fn as_foundation(mut self) -> Self {
        self.foundation = true;
        self
    }

    pub fn declares(&self, hook: Hook) -> bool {
        self.hooks.contains(&hook)
    }
}

// FRAGMENTS
// ================================================================================================

/// Everything one configuration axis value contributes to a contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantFragment {
    pub mixins: Vec<Mixin>,
    /// Hooks the contract must define whenever this fragment is active.
    pub required: BTreeSet<Hook>,
    /// Constructor (or initializer) parameters the fragment's setup calls refer to.
    pub params: Vec<String>,
}

impl VariantFragment {
    pub fn mixin(mixin: Mixin) -> Self {
        Self {
            mixins: vec![mixin],
            ..Self::default()
        }
    }

    pub fn with_mixin(mut self, mixin: Mixin) -> Self {
        self.mixins.push(mixin);
        self
    }

    pub fn requiring(mut self, hooks: &[Hook]) -> Self {
        self.required.extend(hooks.iter().copied());
        self
    }

    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Pairs of hook and the base name that must appear in that hook's override-target list.
    pub fn obligations(&self) -> impl Iterator<Item = (Hook, &str)> {
        self.mixins.iter().flat_map(|mixin| {
            mixin
                .hooks
                .iter()
                .map(move |hook| (*hook, mixin.base.as_str()))
        })
    }
}

// COMPOSITION
// ================================================================================================

/// An override the contract must emit, with the bases it resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Override<'a> {
    pub hook: Hook,
    pub targets: Vec<&'a str>,
}

impl Override<'_> {
    pub fn clause(&self) -> String {
        format!("override({})", self.targets.join(", "))
    }
}

/// The set of fragments active in one contract.
#[derive(Debug, Clone)]
pub struct Composition {
    flavor: Flavor,
    mixins: Vec<Mixin>,
    required: BTreeSet<Hook>,
    params: Vec<String>,
}

impl Composition {
    pub fn new(flavor: Flavor) -> Self {
        Self {
            flavor,
            mixins: Vec::new(),
            required: BTreeSet::new(),
            params: Vec::new(),
        }
    }

    pub fn with(mut self, fragment: &VariantFragment) -> Self {
        self.push(fragment);
        self
    }

    /// Adds a fragment. A base that is already present is not added twice.
    pub fn push(&mut self, fragment: &VariantFragment) {
        for mixin in &fragment.mixins {
            if !self.mixins.iter().any(|m| m.base == mixin.base) {
                self.mixins.push(mixin.clone());
            }
        }
        self.required.extend(fragment.required.iter().copied());
        for param in &fragment.params {
            if !self.params.contains(param) {
                self.params.push(param.clone());
            }
        }
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// Active mixins in inheritance order.
    fn ordered(&self) -> impl Iterator<Item = &Mixin> {
        let foundations = self.mixins.iter().filter(|m| m.foundation);
        foundations.chain(self.mixins.iter().filter(|m| !m.foundation))
    }

    pub fn bases(&self) -> Vec<&str> {
        self.ordered().map(|m| m.base.as_str()).collect()
    }

    pub fn has_base(&self, base: &str) -> bool {
        self.mixins.iter().any(|m| m.base == base)
    }

    pub fn imports(&self) -> Vec<&str> {
        let mut imports: Vec<&str> = Vec::new();
        for mixin in self.ordered() {
            if !imports.contains(&mixin.import.as_str()) {
                imports.push(&mixin.import);
            }
        }
        imports
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// The override-target list for `hook`: every active base declaring it, in inheritance order.
    pub fn override_targets(&self, hook: Hook) -> Vec<&str> {
        self.ordered()
            .filter(|m| m.declares(hook))
            .map(|m| m.base.as_str())
            .collect()
    }

    /// Hooks the contract must define: those required by an active fragment, plus those declared
    /// by more than one active base.
    pub fn overridden_hooks(&self) -> BTreeSet<Hook> {
        let mut hooks = self.required.clone();
        for mixin in &self.mixins {
            for hook in &mixin.hooks {
                if self.mixins.iter().filter(|m| m.declares(*hook)).count() > 1 {
                    hooks.insert(*hook);
                }
            }
        }
        hooks
    }

    /// Returns every override the contract must emit, in emission order.
    ///
    /// Panics if a required hook is not declared by any active base; fragments are expected to
    /// only require hooks that one of their own mixins declares.
    pub fn overrides(&self) -> Vec<Override<'_>> {
        self.overridden_hooks()
            .into_iter()
            .map(|hook| {
                let targets = self.override_targets(hook);
                assert!(
                    !targets.is_empty(),
                    "{} must be overridden but no active base declares it",
                    hook.name()
                );
                Override { hook, targets }
            })
            .collect()
    }

    /// Returns the override for `hook` if the contract must emit one.
    pub fn override_for(&self, hook: Hook) -> Option<Override<'_>> {
        self.overrides().into_iter().find(|o| o.hook == hook)
    }

    // RENDERING
    // --------------------------------------------------------------------------------------------

    /// Writes one import statement per distinct import path.
    pub fn write_imports(&self, writer: &mut Writer) {
        for import in self.imports() {
            writer.import(import);
        }
    }

    /// Returns the contract declaration head, e.g. `contract Foo is A, B`.
    pub fn declaration(&self, name: &str) -> String {
        let bases = self.bases();
        if bases.is_empty() {
            format!("contract {name}")
        } else {
            format!("contract {name} is {}", bases.join(", "))
        }
    }

    /// Writes the constructor, or for the upgradeable flavor the disabled constructor and the
    /// initializer, calling the setup of every active base followed by `body`.
    pub fn write_setup(&self, writer: &mut Writer, body: &[String]) {
        let calls = self.ordered().flat_map(|m| m.setup.iter());
        match self.flavor {
            Flavor::Standard => {
                let modifiers: Vec<String> = calls.filter_map(SetupCall::as_modifier).collect();
                writer.constructor(&self.params, &modifiers, body);
            }
            Flavor::Upgradeable => {
                writer.line("/// @custom:oz-upgrades-unsafe-allow constructor");
                writer.constructor(&[], &[], &["_disableInitializers();".to_string()]);
                writer.blank();

                let mut lines: Vec<String> = calls.map(SetupCall::as_initializer).collect();
                if !lines.is_empty() && !body.is_empty() {
                    lines.push(String::new());
                }
                lines.extend(body.iter().cloned());
                writer.open_function(
                    "initialize",
                    format!("function initialize({}) public initializer", self.params.join(", ")),
                );
                writer.lines(&lines);
                writer.end();
            }
        }
    }
}
