use serde::{Deserialize, Serialize};

/// Status order SPPA. Disimpan sebagai string di kolom `orders.status`,
/// semua perpindahan status harus lewat tabel transisi di `allowed_next`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderStatus {
    /// Order prabayar menunggu pembeli upload bukti pembayaran
    PendingPayment,
    /// Bukti pembayaran menunggu dicek admin
    PaymentReview,
    /// Bukti pembayaran ditolak, pembeli boleh upload ulang
    RejectedPayment,
    /// Menunggu persetujuan admin
    PendingApproval,
    /// Disetujui, menunggu jadwal timbang
    Approved,
    /// Proses penimbangan di kandang
    Weighing,
    /// Hasil timbang keluar, menunggu pelunasan
    PaymentPending,
    /// Ditahan admin sementara
    Hold,
    /// Selesai
    Completed,
    /// Ditolak admin, stok dikembalikan
    Rejected,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::PendingPayment => "pending_payment",
            OrderStatus::PaymentReview => "payment_review",
            OrderStatus::RejectedPayment => "rejected_payment",
            OrderStatus::PendingApproval => "pending_approval",
            OrderStatus::Approved => "approved",
            OrderStatus::Weighing => "weighing",
            OrderStatus::PaymentPending => "payment_pending",
            OrderStatus::Hold => "hold",
            OrderStatus::Completed => "completed",
            OrderStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending_payment" => Some(OrderStatus::PendingPayment),
            "payment_review" => Some(OrderStatus::PaymentReview),
            "rejected_payment" => Some(OrderStatus::RejectedPayment),
            "pending_approval" => Some(OrderStatus::PendingApproval),
            "approved" => Some(OrderStatus::Approved),
            "weighing" => Some(OrderStatus::Weighing),
            "payment_pending" => Some(OrderStatus::PaymentPending),
            "hold" => Some(OrderStatus::Hold),
            "completed" => Some(OrderStatus::Completed),
            "rejected" => Some(OrderStatus::Rejected),
            _ => None,
        }
    }

    /// Status lanjutan yang sah dari status ini
    pub fn allowed_next(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::PendingPayment => &[OrderStatus::PaymentReview],
            OrderStatus::PaymentReview => {
                &[OrderStatus::PendingApproval, OrderStatus::RejectedPayment]
            }
            OrderStatus::RejectedPayment => &[OrderStatus::PaymentReview],
            OrderStatus::PendingApproval => &[OrderStatus::Approved, OrderStatus::Rejected],
            OrderStatus::Approved => &[OrderStatus::Weighing, OrderStatus::Hold],
            OrderStatus::Weighing => &[OrderStatus::PaymentPending, OrderStatus::Hold],
            OrderStatus::PaymentPending => &[OrderStatus::Completed, OrderStatus::Hold],
            OrderStatus::Hold => &[OrderStatus::Weighing, OrderStatus::PaymentPending],
            OrderStatus::Completed | OrderStatus::Rejected => &[],
        }
    }

    pub fn can_transition(&self, next: OrderStatus) -> bool {
        self.allowed_next().contains(&next)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_next().is_empty()
    }
}

// Metode pembayaran yang diterima saat checkout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MetodePembayaran {
    PayLater,
    Qris,
    BankTransfer,
}

impl MetodePembayaran {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetodePembayaran::PayLater => "pay_later",
            MetodePembayaran::Qris => "qris",
            MetodePembayaran::BankTransfer => "bank_transfer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pay_later" => Some(MetodePembayaran::PayLater),
            "qris" => Some(MetodePembayaran::Qris),
            "bank_transfer" => Some(MetodePembayaran::BankTransfer),
            _ => None,
        }
    }

    /// Prabayar berarti order mulai dari pending_payment dan
    /// wajib akun terverifikasi
    pub fn is_prepaid(&self) -> bool {
        !matches!(self, MetodePembayaran::PayLater)
    }

    /// Status awal order sesuai metode pembayaran
    pub fn initial_status(&self) -> OrderStatus {
        if self.is_prepaid() {
            OrderStatus::PendingPayment
        } else {
            OrderStatus::PendingApproval
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATUSES: [OrderStatus; 10] = [
        OrderStatus::PendingPayment,
        OrderStatus::PaymentReview,
        OrderStatus::RejectedPayment,
        OrderStatus::PendingApproval,
        OrderStatus::Approved,
        OrderStatus::Weighing,
        OrderStatus::PaymentPending,
        OrderStatus::Hold,
        OrderStatus::Completed,
        OrderStatus::Rejected,
    ];

    #[test]
    fn test_status_roundtrip() {
        for status in ALL_STATUSES {
            assert_eq!(OrderStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::from_str("dikirim"), None);
        assert_eq!(OrderStatus::from_str("PENDING_PAYMENT"), None);
    }

    #[test]
    fn test_happy_path_pay_later() {
        let path = [
            OrderStatus::PendingApproval,
            OrderStatus::Approved,
            OrderStatus::Weighing,
            OrderStatus::PaymentPending,
            OrderStatus::Completed,
        ];
        for pair in path.windows(2) {
            assert!(
                pair[0].can_transition(pair[1]),
                "{} -> {} harus sah",
                pair[0].as_str(),
                pair[1].as_str()
            );
        }
    }

    #[test]
    fn test_happy_path_prepaid() {
        assert!(OrderStatus::PendingPayment.can_transition(OrderStatus::PaymentReview));
        assert!(OrderStatus::PaymentReview.can_transition(OrderStatus::PendingApproval));
        // Bukti ditolak: pembeli boleh coba lagi
        assert!(OrderStatus::PaymentReview.can_transition(OrderStatus::RejectedPayment));
        assert!(OrderStatus::RejectedPayment.can_transition(OrderStatus::PaymentReview));
    }

    #[test]
    fn test_hold_and_release() {
        assert!(OrderStatus::Approved.can_transition(OrderStatus::Hold));
        assert!(OrderStatus::Weighing.can_transition(OrderStatus::Hold));
        assert!(OrderStatus::PaymentPending.can_transition(OrderStatus::Hold));
        assert!(OrderStatus::Hold.can_transition(OrderStatus::Weighing));
        assert!(OrderStatus::Hold.can_transition(OrderStatus::PaymentPending));
        // Hold bukan jalan pintas ke selesai
        assert!(!OrderStatus::Hold.can_transition(OrderStatus::Completed));
    }

    #[test]
    fn test_terminal_states_have_no_exit() {
        for status in [OrderStatus::Completed, OrderStatus::Rejected] {
            assert!(status.is_terminal());
            for next in ALL_STATUSES {
                assert!(!status.can_transition(next));
            }
        }
    }

    #[test]
    fn test_illegal_jumps_rejected() {
        assert!(!OrderStatus::PendingApproval.can_transition(OrderStatus::Completed));
        assert!(!OrderStatus::PendingPayment.can_transition(OrderStatus::Approved));
        assert!(!OrderStatus::Approved.can_transition(OrderStatus::PendingApproval));
        assert!(!OrderStatus::Weighing.can_transition(OrderStatus::Completed));
    }

    #[test]
    fn test_metode_pembayaran() {
        for metode in [
            MetodePembayaran::PayLater,
            MetodePembayaran::Qris,
            MetodePembayaran::BankTransfer,
        ] {
            assert_eq!(MetodePembayaran::from_str(metode.as_str()), Some(metode));
        }
        assert_eq!(MetodePembayaran::from_str("cod"), None);

        assert!(!MetodePembayaran::PayLater.is_prepaid());
        assert!(MetodePembayaran::Qris.is_prepaid());
        assert_eq!(
            MetodePembayaran::PayLater.initial_status(),
            OrderStatus::PendingApproval
        );
        assert_eq!(
            MetodePembayaran::BankTransfer.initial_status(),
            OrderStatus::PendingPayment
        );
    }
}
