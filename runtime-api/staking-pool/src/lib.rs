// KILT Blockchain – https://botlabs.org
// Copyright (C) 2019-2024 BOTLabs GmbH

// The KILT Blockchain is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The KILT Blockchain is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

// If you feel like getting in touch with us, you can do so at info@botlabs.org

#![cfg_attr(not(feature = "std"), no_std)]

use parity_scale_codec::{Codec, Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;

/// Aggregate staking information for a single account.
///
/// Wait times are expressed as the remaining time until the respective
/// action becomes available. For accounts without a stake entry they
/// default to the full configured delays.
#[derive(Decode, Encode, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug)]
pub struct UserStakingInfo<Balance, Moment> {
	/// The amount currently staked by the account.
	pub staked_amount: Balance,
	/// Remaining time until a pending withdrawal can be executed.
	pub withdrawal_wait: Moment,
	/// Remaining time until the next claim is permitted.
	pub claim_wait: Moment,
	/// Estimate of the reward the account could claim right now.
	pub claimable_reward: Balance,
}

sp_api::decl_runtime_apis! {
	/// The API to query the user staking pool.
	pub trait StakingPool<AccountId, Balance, Moment>
	where
		AccountId: Codec,
		Balance: Codec,
		Moment: Codec,
	{
		/// Returns the aggregate staking information for a given account.
		fn user_staking(account: AccountId) -> UserStakingInfo<Balance, Moment>;
		/// Returns the reward the account could claim right now, ignoring
		/// the claim cooldown.
		fn claimable_reward(account: AccountId) -> Balance;
	}
}
