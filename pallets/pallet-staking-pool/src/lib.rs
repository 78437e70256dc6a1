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

//! # Staking Pool
//!
//! A pallet for staking a fungible asset and distributing external reward
//! income pro rata among the stakers, with both unstaking and reward claims
//! gated by fixed cooldown periods.
//!
//! Participants call `stake` to move funds into a pool account owned by the
//! pallet. Reward income arrives in an external vault which reports its
//! cumulative total through the [`traits::RewardVault`] abstraction; on
//! `claim`, a participant receives the floor of their current stake
//! proportion applied to the income that has not been distributed yet. The
//! pallet only ever advances its distribution counter by the amounts
//! actually paid out, so rounding remainders are not lost but stay claimable
//! in later rounds.
//!
//! Unstaking is a two-phase state machine: `request_withdrawal` records a
//! timestamp, and `withdraw` is only permitted once the configured delay has
//! elapsed. This makes the delay provable by timestamp comparison alone,
//! without any timer service. Re-requesting restarts the cooldown.
//!
//! - [`Config`]
//! - [`Call`]
//! - [`Pallet`]
//!
//! ## Assumptions
//!
//! - The vault's reported cumulative income does not decrease during correct
//!   operation. A reading below the already-distributed amount is treated as
//!   "no new income", never as a reason to claw anything back.
//! - All time gating is computed against [`Config::Clock`] at call time;
//!   there is no background processing.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod traits;
pub mod types;

mod api;
mod default_weights;

#[cfg(test)]
mod mock;

#[cfg(any(test, feature = "try-runtime"))]
mod try_state;

#[cfg(test)]
mod tests;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub use crate::{default_weights::WeightInfo, pallet::*};

#[frame_support::pallet]
pub mod pallet {
	use frame_support::{
		pallet_prelude::*,
		traits::{
			fungible::{Inspect, Mutate},
			tokens::Preservation,
			Time,
		},
		PalletId,
	};
	use frame_system::pallet_prelude::*;
	use sp_arithmetic::{helpers_128bit::multiply_by_rational_with_rounding, Rounding};
	use sp_runtime::{
		traits::{AccountIdConversion, Saturating, Zero},
		ArithmeticError, SaturatedConversion,
	};

	use crate::{
		traits::{RewardVault, VaultError},
		types::{AccountIdOf, BalanceOf, MomentOf, StakeEntryOf},
	};

	use super::WeightInfo;

	const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

	pub(crate) const LOG_TARGET: &str = "runtime::staking-pool";

	#[pallet::config]
	pub trait Config: frame_system::Config {
		/// The overarching event type.
		type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;
		/// The fungible asset participants stake. Staked funds are held in
		/// the pool account derived from [`Config::PalletId`].
		type Currency: Mutate<AccountIdOf<Self>>;
		/// The external source of reward income and executor of reward
		/// payouts.
		type RewardVault: RewardVault<AccountIdOf<Self>, BalanceOf<Self>>;
		/// The monotonic clock all cooldowns are measured against.
		type Clock: Time;
		/// The minimum time between requesting and executing a withdrawal.
		#[pallet::constant]
		type MinWithdrawDelay: Get<MomentOf<Self>>;
		/// The minimum time between two reward claims of the same
		/// participant, measured from first stake respectively from the last
		/// claim.
		#[pallet::constant]
		type MinClaimDelay: Get<MomentOf<Self>>;
		/// The pallet's id, used to derive the account holding the staked
		/// funds.
		#[pallet::constant]
		type PalletId: Get<PalletId>;
		/// Weight information for extrinsics in this pallet.
		type WeightInfo: WeightInfo;
	}

	#[pallet::pallet]
	#[pallet::storage_version(STORAGE_VERSION)]
	pub struct Pallet<T>(_);

	/// Map of participant -> stake entry.
	///
	/// Entries are created on first stake and never removed, so an entry
	/// with zero `amount` can still be queried and re-staked to.
	#[pallet::storage]
	#[pallet::getter(fn stakes)]
	pub type Stakes<T: Config> = StorageMap<_, Blake2_128Concat, AccountIdOf<T>, StakeEntryOf<T>>;

	/// The sum of all participants' staked amounts.
	#[pallet::storage]
	#[pallet::getter(fn total_staked)]
	pub type TotalStaked<T: Config> = StorageValue<_, BalanceOf<T>, ValueQuery>;

	/// Cumulative reward income that has already been paid out across all
	/// claims. Advances exactly by the amounts paid, never by the full new
	/// income of a claim, so rounding remainders stay distributable.
	#[pallet::storage]
	#[pallet::getter(fn distributed_income)]
	pub type DistributedIncome<T: Config> = StorageValue<_, BalanceOf<T>, ValueQuery>;

	#[pallet::event]
	#[pallet::generate_deposit(pub(super) fn deposit_event)]
	pub enum Event<T: Config> {
		/// An account added funds to its stake.
		Staked {
			who: AccountIdOf<T>,
			amount: BalanceOf<T>,
		},
		/// An account armed (or re-armed) the withdrawal cooldown.
		WithdrawalRequested {
			who: AccountIdOf<T>,
			available_at: MomentOf<T>,
		},
		/// An account withdrew previously staked funds.
		Withdrawn {
			who: AccountIdOf<T>,
			amount: BalanceOf<T>,
		},
		/// An account claimed its share of the reward income. A zero amount
		/// means no new income had arrived since the last distribution.
		RewardClaimed {
			who: AccountIdOf<T>,
			amount: BalanceOf<T>,
		},
	}

	#[pallet::error]
	pub enum Error<T> {
		/// The given amount was zero.
		ZeroAmount,
		/// The respective cooldown has not elapsed yet.
		TooEarly,
		/// The withdrawal amount exceeds the participant's staked amount, or
		/// there is no stake to request a withdrawal for.
		InsufficientStake,
		/// A withdrawal was attempted without a pending request.
		NotRequested,
		/// A claim was attempted by an unknown participant or while the pool
		/// holds no stake at all.
		NothingStaked,
		/// The reward vault failed to pay out the claimed share.
		TransferFailed,
		/// The reward vault could not be queried or returned an invalid
		/// value.
		OracleUnavailable,
	}

	impl<T> From<VaultError> for Error<T> {
		fn from(error: VaultError) -> Self {
			match error {
				VaultError::Unavailable => Error::<T>::OracleUnavailable,
				VaultError::PayoutFailed => Error::<T>::TransferFailed,
			}
		}
	}

	#[pallet::hooks]
	impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
		#[cfg(feature = "try-runtime")]
		fn try_state(_n: BlockNumberFor<T>) -> Result<(), sp_runtime::TryRuntimeError> {
			crate::try_state::do_try_state::<T>()
		}
	}

	#[pallet::call]
	impl<T: Config> Pallet<T> {
		/// Add `amount` to the caller's stake.
		///
		/// The funds are transferred into the pool account; a failing
		/// transfer aborts the call before any bookkeeping happens. First
		/// time stakers get a stake entry whose claim cooldown starts now.
		///
		/// Emits `Staked`.
		#[pallet::call_index(0)]
		#[pallet::weight(<T as Config>::WeightInfo::stake())]
		pub fn stake(origin: OriginFor<T>, amount: BalanceOf<T>) -> DispatchResult {
			let who = ensure_signed(origin)?;
			ensure!(!amount.is_zero(), Error::<T>::ZeroAmount);

			T::Currency::transfer(&who, &Self::pool_account(), amount, Preservation::Expendable)?;

			let now = T::Clock::now();
			Stakes::<T>::mutate(&who, |maybe_entry| {
				let entry = maybe_entry.get_or_insert_with(|| StakeEntryOf::<T>::new(now));
				entry.amount = entry.amount.saturating_add(amount);
			});
			TotalStaked::<T>::mutate(|total| *total = total.saturating_add(amount));

			Self::deposit_event(Event::<T>::Staked { who, amount });

			Ok(())
		}

		/// Arm the withdrawal cooldown for the caller's stake.
		///
		/// No funds move. An already pending request is overwritten, which
		/// restarts the cooldown from now.
		///
		/// Emits `WithdrawalRequested`.
		#[pallet::call_index(1)]
		#[pallet::weight(<T as Config>::WeightInfo::request_withdrawal())]
		pub fn request_withdrawal(origin: OriginFor<T>) -> DispatchResult {
			let who = ensure_signed(origin)?;
			let now = T::Clock::now();

			Stakes::<T>::try_mutate(&who, |maybe_entry| -> DispatchResult {
				let entry = maybe_entry
					.as_mut()
					.filter(|entry| !entry.amount.is_zero())
					.ok_or(Error::<T>::InsufficientStake)?;
				entry.withdrawal_requested_at = Some(now);
				Ok(())
			})?;

			Self::deposit_event(Event::<T>::WithdrawalRequested {
				who,
				available_at: now.saturating_add(T::MinWithdrawDelay::get()),
			});

			Ok(())
		}

		/// Withdraw `amount` of previously staked funds.
		///
		/// Requires a withdrawal request older than the configured delay.
		/// The pending request is consumed even for a partial withdrawal;
		/// withdrawing the remainder requires a new request.
		///
		/// Emits `Withdrawn`.
		#[pallet::call_index(2)]
		#[pallet::weight(<T as Config>::WeightInfo::withdraw())]
		pub fn withdraw(origin: OriginFor<T>, amount: BalanceOf<T>) -> DispatchResult {
			let who = ensure_signed(origin)?;
			ensure!(!amount.is_zero(), Error::<T>::ZeroAmount);

			let now = T::Clock::now();

			Stakes::<T>::try_mutate(&who, |maybe_entry| -> DispatchResult {
				let entry = maybe_entry.as_mut().ok_or(Error::<T>::NotRequested)?;
				let requested_at = entry.withdrawal_requested_at.ok_or(Error::<T>::NotRequested)?;

				ensure!(
					now.saturating_sub(requested_at) >= T::MinWithdrawDelay::get(),
					Error::<T>::TooEarly
				);
				ensure!(amount <= entry.amount, Error::<T>::InsufficientStake);

				entry.amount = entry.amount.saturating_sub(amount);
				entry.withdrawal_requested_at = None;
				Ok(())
			})?;

			TotalStaked::<T>::mutate(|total| *total = total.saturating_sub(amount));
			// A failing transfer rolls back the whole extrinsic, including
			// the mutations above.
			T::Currency::transfer(&Self::pool_account(), &who, amount, Preservation::Expendable)?;

			log::trace!(target: LOG_TARGET, "Withdrew {:?} for {:?}", amount, who);
			Self::deposit_event(Event::<T>::Withdrawn { who, amount });

			Ok(())
		}

		/// Claim the caller's pro-rata share of reward income that has not
		/// been distributed yet.
		///
		/// The share is `floor(new_income * own_stake / total_stake)`,
		/// evaluated against the stake distribution at claim time. A claim
		/// with no new income succeeds with a zero payout but still restarts
		/// the claim cooldown.
		///
		/// Emits `RewardClaimed`.
		#[pallet::call_index(3)]
		#[pallet::weight(<T as Config>::WeightInfo::claim())]
		pub fn claim(origin: OriginFor<T>) -> DispatchResult {
			let who = ensure_signed(origin)?;
			let now = T::Clock::now();

			let mut entry = Stakes::<T>::get(&who).ok_or(Error::<T>::NothingStaked)?;
			ensure!(entry.can_claim(now, T::MinClaimDelay::get()), Error::<T>::TooEarly);

			let total = TotalStaked::<T>::get();
			ensure!(!total.is_zero(), Error::<T>::NothingStaked);

			let available = T::RewardVault::total_available().map_err(Error::<T>::from)?;
			let new_income = available.saturating_sub(DistributedIncome::<T>::get());

			let share = Self::pro_rata_share(new_income, entry.amount, total)?;

			if !share.is_zero() {
				T::RewardVault::payout(&who, share).map_err(Error::<T>::from)?;
				DistributedIncome::<T>::mutate(|paid| *paid = paid.saturating_add(share));
				log::trace!(target: LOG_TARGET, "Paid out reward {:?} to {:?}", share, who);
			}

			entry.last_claim_at = now;
			Stakes::<T>::insert(&who, entry);

			Self::deposit_event(Event::<T>::RewardClaimed { who, amount: share });

			Ok(())
		}
	}

	impl<T: Config> Pallet<T> {
		/// The account holding all staked funds.
		pub fn pool_account() -> AccountIdOf<T> {
			T::PalletId::get().into_account_truncating()
		}

		/// `floor(new_income * amount / total)` in exact 128-bit integer
		/// arithmetic. The remainder is deliberately not distributed; it
		/// stays claimable because [`DistributedIncome`] only advances by
		/// what is paid.
		pub(crate) fn pro_rata_share(
			new_income: BalanceOf<T>,
			amount: BalanceOf<T>,
			total: BalanceOf<T>,
		) -> Result<BalanceOf<T>, DispatchError> {
			if new_income.is_zero() || amount.is_zero() {
				return Ok(Zero::zero());
			}

			let share = multiply_by_rational_with_rounding(
				new_income.saturated_into::<u128>(),
				amount.saturated_into::<u128>(),
				total.saturated_into::<u128>(),
				Rounding::Down,
			)
			.ok_or(ArithmeticError::Overflow)?;

			Ok(share.saturated_into())
		}
	}
}
