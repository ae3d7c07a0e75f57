//! Court-auction proceeds distributed to claims in strict priority order.
//!
//! The pool and every claim are first rounded to whole won. Each claim then
//! takes `min(remaining, claim)` and whatever is left goes to the owner, so
//! the distributions always add back to the rounded sale price.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::numeric::round_to_won;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::validation::{require_range, MAX_AMOUNT};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Ranking of a claim against the proceeds, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClaimPriority {
    #[serde(rename = "경매비용")]
    AuctionCost,
    #[serde(rename = "선순위채권")]
    SeniorLien,
    #[serde(rename = "임차보증금")]
    TenantDeposit,
    #[serde(rename = "후순위채권")]
    JuniorLien,
    #[serde(rename = "소유자 잔여금")]
    OwnerResidual,
}

impl ClaimPriority {
    pub fn label(self) -> &'static str {
        match self {
            ClaimPriority::AuctionCost => "경매비용",
            ClaimPriority::SeniorLien => "선순위채권",
            ClaimPriority::TenantDeposit => "임차보증금",
            ClaimPriority::JuniorLien => "후순위채권",
            ClaimPriority::OwnerResidual => "소유자 잔여금",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionDistributionInput {
    pub sale_price: Money,
    pub auction_cost: Money,
    pub senior_claim: Money,
    /// Deposit of a tenant with opposable rights.
    pub tenant_deposit: Money,
    pub junior_claim: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionItem {
    pub name: ClaimPriority,
    pub claim: Money,
    pub distributed: Money,
    pub satisfied: bool,
    pub shortfall: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionDistributionOutput {
    pub total_sale_price: Money,
    pub total_distributed: Money,
    pub distributions: Vec<DistributionItem>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_auction_distribution(
    input: &AuctionDistributionInput,
) -> CalcResult<ComputationOutput<AuctionDistributionOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    validate_distribution_input(input)?;

    let claims = [
        (ClaimPriority::AuctionCost, input.auction_cost),
        (ClaimPriority::SeniorLien, input.senior_claim),
        (ClaimPriority::TenantDeposit, input.tenant_deposit),
        (ClaimPriority::JuniorLien, input.junior_claim),
    ];
    let total_sale_price = round_to_won(input.sale_price);
    let distributions = waterfall(total_sale_price, &claims);

    let unpaid: Vec<&DistributionItem> = distributions.iter().filter(|d| !d.satisfied).collect();
    if let Some(first) = unpaid.first() {
        let shortfall: Money = unpaid.iter().map(|d| d.shortfall).sum();
        warnings.push(format!(
            "매각대금이 부족하여 {} 이하 채권 {}원이 변제되지 않습니다.",
            first.name.label(),
            shortfall
        ));
    }

    let total_distributed = distributions.iter().map(|d| d.distributed).sum();

    let output = AuctionDistributionOutput {
        total_sale_price,
        total_distributed,
        distributions,
    };

    Ok(with_metadata(
        "Priority waterfall: costs, senior lien, tenant deposit, junior lien, owner",
        &serde_json::json!({ "claims": claims.len() }),
        warnings,
        output,
    ))
}

/// Allocates `pool` to `claims` in slice order and appends the owner's
/// residual. Claims are assumed non-negative. Amounts are rounded to won
/// before allocation.
pub fn waterfall(pool: Money, claims: &[(ClaimPriority, Money)]) -> Vec<DistributionItem> {
    let mut remaining = round_to_won(pool);
    let mut items = Vec::with_capacity(claims.len() + 1);

    for &(name, claim) in claims {
        let claim = round_to_won(claim);
        let distributed = remaining.min(claim);
        remaining -= distributed;
        items.push(DistributionItem {
            name,
            claim,
            distributed,
            satisfied: distributed >= claim,
            shortfall: (claim - distributed).max(Decimal::ZERO),
        });
    }

    items.push(DistributionItem {
        name: ClaimPriority::OwnerResidual,
        claim: Decimal::ZERO,
        distributed: remaining,
        satisfied: true,
        shortfall: Decimal::ZERO,
    });
    items
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_distribution_input(input: &AuctionDistributionInput) -> CalcResult<()> {
    let fields = [
        ("sale_price", input.sale_price, "매각대금"),
        ("auction_cost", input.auction_cost, "경매비용"),
        ("senior_claim", input.senior_claim, "선순위채권액"),
        ("tenant_deposit", input.tenant_deposit, "임차보증금"),
        ("junior_claim", input.junior_claim, "후순위채권액"),
    ];
    for (field, value, label) in fields {
        require_range(
            field,
            value,
            Decimal::ZERO,
            MAX_AMOUNT,
            &format!("{label}은 0 이상 100경원 이하여야 합니다."),
        )?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
