//! Day quality: the twelve deities (hoàng đạo / hắc đạo), the twelve Trực
//! and conflicting ages.

use std::fmt;

use serde::Serialize;
use tracing::error;

use crate::date::SolarDate;
use crate::error::{Error, Result};
use crate::sexagenary::Branch;

/// Whether a day or deity is favorable.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub enum DayKind {
    /// Hoàng đạo.
    Auspicious,
    /// Hắc đạo.
    Inauspicious,
}

impl DayKind {
    pub fn name(&self) -> &'static str {
        match self {
            DayKind::Auspicious => "Hoàng đạo",
            DayKind::Inauspicious => "Hắc đạo",
        }
    }
    pub fn is_auspicious(&self) -> bool {
        matches!(self, DayKind::Auspicious)
    }
}

impl fmt::Display for DayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The twelve deities presiding over days.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
pub enum Deity {
    ThanhLong,
    MinhDuong,
    KimQuy,
    KimDuong,
    NgocDuong,
    TuMenh,
    ThienHinh,
    ChuTuoc,
    BachHo,
    ThienLao,
    NguyenVu,
    CauTran,
}

use Deity::*;

const AUSPICIOUS_COLOR: &str = "#16a34a";
const INAUSPICIOUS_COLOR: &str = "#dc2626";

/// Descriptive record of a deity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeityRecord {
    pub description: &'static str,
    pub favorable: &'static [&'static str],
    pub unfavorable: &'static [&'static str],
    /// Display color, hex RGB.
    pub color: &'static str,
    /// Icon slug, e.g. `thanh-long`.
    pub icon: &'static str,
}

impl Deity {
    pub const ALL: [Deity; 12] = [
        ThanhLong, MinhDuong, KimQuy, KimDuong, NgocDuong, TuMenh, ThienHinh, ChuTuoc, BachHo,
        ThienLao, NguyenVu, CauTran,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ThanhLong => "Thanh Long",
            MinhDuong => "Minh Đường",
            KimQuy => "Kim Quỹ",
            KimDuong => "Kim Đường",
            NgocDuong => "Ngọc Đường",
            TuMenh => "Tư Mệnh",
            ThienHinh => "Thiên Hình",
            ChuTuoc => "Chu Tước",
            BachHo => "Bạch Hổ",
            ThienLao => "Thiên Lao",
            NguyenVu => "Nguyên Vũ",
            CauTran => "Câu Trần",
        }
    }

    /// Parses a deity name, ignoring case. "Kim Quý" is accepted for Kim Quỹ.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        if name == "kim quý" {
            return Some(KimQuy);
        }
        Self::ALL.into_iter().find(|d| d.name().to_lowercase() == name)
    }

    pub fn kind(&self) -> DayKind {
        match self {
            ThanhLong | MinhDuong | KimQuy | KimDuong | NgocDuong | TuMenh => DayKind::Auspicious,
            ThienHinh | ChuTuoc | BachHo | ThienLao | NguyenVu | CauTran => DayKind::Inauspicious,
        }
    }

    pub fn is_auspicious(&self) -> bool {
        self.kind().is_auspicious()
    }

    pub fn record(&self) -> &'static DeityRecord {
        &DEITY_RECORDS[*self as usize]
    }
}

impl fmt::Display for Deity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Records in [`Deity::ALL`] order.
static DEITY_RECORDS: [DeityRecord; 12] = [
    DeityRecord {
        description: "Thanh Long - Thần rồng xanh phương Đông, mang lại may mắn và thịnh vượng",
        favorable: &["Khởi công", "Khai trương", "Cưới hỏi", "Di chuyển", "Giao dịch", "Ký kết"],
        unfavorable: &["Chôn cất"],
        color: AUSPICIOUS_COLOR,
        icon: "thanh-long",
    },
    DeityRecord {
        description: "Minh Đường - Cung điện sáng sủa, tốt cho việc học hành và làm quan",
        favorable: &["Học hành", "Thi cử", "Nhậm chức", "Khai giảng", "Cầu công danh"],
        unfavorable: &["Tang lễ"],
        color: AUSPICIOUS_COLOR,
        icon: "minh-duong",
    },
    DeityRecord {
        description: "Kim Quỹ - Thần kim quỹ, tốt cho tài lộc và thương mại",
        favorable: &["Giao dịch", "Buôn bán", "Mở cửa hàng", "Cầu tài", "Đầu tư"],
        unfavorable: &["Cho vay tiền"],
        color: AUSPICIOUS_COLOR,
        icon: "kim-quy",
    },
    DeityRecord {
        description: "Kim Đường - Cung điện vàng, rất tốt cho mọi việc",
        favorable: &["Mọi việc đều tốt", "Cưới hỏi", "Xây dựng", "Khai trương"],
        unfavorable: &[],
        color: AUSPICIOUS_COLOR,
        icon: "kim-duong",
    },
    DeityRecord {
        description: "Ngọc Đường - Cung điện ngọc, tốt cho các việc cao quý",
        favorable: &["Cưới hỏi", "Lễ hội", "Khánh thành", "Cầu phúc"],
        unfavorable: &["Kiện tụng"],
        color: AUSPICIOUS_COLOR,
        icon: "ngoc-duong",
    },
    DeityRecord {
        description: "Tư Mệnh - Thần quản lý số mệnh, tốt cho việc cầu an và sức khỏe",
        favorable: &["Cầu an", "Khám bệnh", "Uống thuốc", "Dưỡng sinh"],
        unfavorable: &["Khởi công lớn"],
        color: AUSPICIOUS_COLOR,
        icon: "tu-menh",
    },
    DeityRecord {
        description: "Thiên Hình - Thần hình phạt, xấu cho việc ký kết và pháp lý",
        favorable: &["Trừ tà", "Diệt trừ"],
        unfavorable: &["Ký kết", "Kiện tụng", "Giao dịch", "Cưới hỏi"],
        color: INAUSPICIOUS_COLOR,
        icon: "thien-hinh",
    },
    DeityRecord {
        description: "Chu Tước - Chim đỏ hung dữ, xấu cho giao tiếp và tranh tụng",
        favorable: &["Câm lặng", "Tu tâm"],
        unfavorable: &["Tranh tụng", "Đàm phán", "Ký kết", "Giao tiếp"],
        color: INAUSPICIOUS_COLOR,
        icon: "chu-tuoc",
    },
    DeityRecord {
        description: "Bạch Hổ - Hổ trắng hung ác, mang lại bất hạnh và xung đột",
        favorable: &["Việc quân sự", "Phá dỡ"],
        unfavorable: &["Cưới hỏi", "Khai trương", "Đi xa", "Quyết định quan trọng"],
        color: INAUSPICIOUS_COLOR,
        icon: "bach-ho",
    },
    DeityRecord {
        description: "Thiên Lao - Ngục trời, hạn chế tự do và di chuyển",
        favorable: &["Nghỉ ngơi", "Suy tư"],
        unfavorable: &["Đi xa", "Khởi nghiệp", "Cưới hỏi", "Họp hành quan trọng"],
        color: INAUSPICIOUS_COLOR,
        icon: "thien-lao",
    },
    DeityRecord {
        description: "Nguyên Vũ - Thần tướng tối, mang lại chướng ngại và khó khăn",
        favorable: &["Phòng thủ", "Nghi lễ bảo vệ"],
        unfavorable: &["Khởi sự mới", "Cưới hỏi", "Khai trương", "Đi xa"],
        color: INAUSPICIOUS_COLOR,
        icon: "nguyen-vu",
    },
    DeityRecord {
        description: "Câu Trần - Sao chó, gây rối loạn và xui xẻo",
        favorable: &["Dọn dẹp", "Tẩy uế"],
        unfavorable: &["Mọi việc quan trọng", "Cưới hỏi", "Giao dịch", "Đi xa"],
        color: INAUSPICIOUS_COLOR,
        icon: "cau-tran",
    },
];

/// Deity by month bucket, then by day branch (Tý first). Bucket `i` holds
/// lunar months `i + 1` and `i + 7`.
#[rustfmt::skip]
const DEITY_TABLE: [[Deity; 12]; 6] = [
    // 1, 7
    [ThanhLong, MinhDuong, ThienHinh, ChuTuoc, KimQuy, KimDuong, BachHo, NgocDuong, ThienLao, NguyenVu, TuMenh, CauTran],
    // 2, 8
    [TuMenh, CauTran, ThanhLong, MinhDuong, ThienHinh, ChuTuoc, KimQuy, KimDuong, BachHo, NgocDuong, ThienLao, NguyenVu],
    // 3, 9
    [ThienLao, NguyenVu, TuMenh, CauTran, ThanhLong, MinhDuong, ThienHinh, ChuTuoc, KimQuy, KimDuong, BachHo, NgocDuong],
    // 4, 10
    [BachHo, NgocDuong, ThienLao, NguyenVu, TuMenh, CauTran, ThanhLong, MinhDuong, ThienHinh, ChuTuoc, KimQuy, KimDuong],
    // 5, 11
    [KimQuy, KimDuong, BachHo, NgocDuong, ThienLao, NguyenVu, TuMenh, CauTran, ThanhLong, MinhDuong, ThienHinh, ChuTuoc],
    // 6, 12
    [ThienHinh, ChuTuoc, KimQuy, KimDuong, BachHo, NgocDuong, ThienLao, NguyenVu, TuMenh, CauTran, ThanhLong, MinhDuong],
];

fn month_row(lunar_month: u32) -> Option<&'static [Deity; 12]> {
    match lunar_month {
        1..=12 => Some(&DEITY_TABLE[(lunar_month as usize - 1) % 6]),
        _ => None,
    }
}

/// The deity presiding over a day with branch `branch` in `lunar_month`.
///
/// # Example
///
/// ```
/// use amlich::day_quality::{self, Deity};
/// use amlich::sexagenary::Branch;
///
/// assert_eq!(Some(Deity::ThanhLong), day_quality::god_for_branch_and_month(Branch::Ty, 1));
/// assert_eq!(Some(Deity::ThanhLong), day_quality::god_for_branch_and_month(Branch::Dan, 8));
/// assert_eq!(None, day_quality::god_for_branch_and_month(Branch::Ty, 13));
/// ```
pub fn god_for_branch_and_month(branch: Branch, lunar_month: u32) -> Option<Deity> {
    month_row(lunar_month).map(|row| row[branch.index()])
}

/// Everything known about the deity of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayAnalysis {
    pub date: SolarDate,
    pub lunar_month: u32,
    pub day_branch: Branch,
    pub deity: Deity,
    pub kind: DayKind,
    pub record: &'static DeityRecord,
}

impl DayAnalysis {
    pub fn is_auspicious(&self) -> bool {
        self.kind.is_auspicious()
    }
    pub fn is_inauspicious(&self) -> bool {
        !self.is_auspicious()
    }
}

pub fn detailed_day_info(date: SolarDate, branch: Branch, lunar_month: u32) -> Result<DayAnalysis> {
    let Some(deity) = god_for_branch_and_month(branch, lunar_month) else {
        error!(%date, %branch, lunar_month, "no deity assigned");
        return Err(Error::NoDeity {
            branch,
            month: lunar_month,
        });
    };
    Ok(DayAnalysis {
        date,
        lunar_month,
        day_branch: branch,
        deity,
        kind: deity.kind(),
        record: deity.record(),
    })
}

pub fn is_auspicious_day(branch: Branch, lunar_month: u32) -> bool {
    god_for_branch_and_month(branch, lunar_month).is_some_and(|d| d.is_auspicious())
}

pub fn is_inauspicious_day(branch: Branch, lunar_month: u32) -> bool {
    god_for_branch_and_month(branch, lunar_month).is_some_and(|d| !d.is_auspicious())
}

fn branches_of_kind(lunar_month: u32, kind: DayKind) -> Vec<Branch> {
    let Some(row) = month_row(lunar_month) else {
        return Vec::new();
    };
    Branch::ALL
        .into_iter()
        .filter(|b| row[b.index()].kind() == kind)
        .collect()
}

/// Day branches that are hoàng đạo in `lunar_month`. Empty for an invalid month.
pub fn auspicious_branches_in_month(lunar_month: u32) -> Vec<Branch> {
    branches_of_kind(lunar_month, DayKind::Auspicious)
}

/// Day branches that are hắc đạo in `lunar_month`. Empty for an invalid month.
pub fn inauspicious_branches_in_month(lunar_month: u32) -> Vec<Branch> {
    branches_of_kind(lunar_month, DayKind::Inauspicious)
}

pub fn auspicious_gods() -> Vec<Deity> {
    Deity::ALL.into_iter().filter(Deity::is_auspicious).collect()
}

pub fn inauspicious_gods() -> Vec<Deity> {
    Deity::ALL.into_iter().filter(|d| !d.is_auspicious()).collect()
}

pub fn display_color(deity: Deity) -> &'static str {
    deity.record().color
}

pub fn display_icon(deity: Deity) -> &'static str {
    deity.record().icon
}

/// Ages (birth-year branches) clashing with a day of branch `branch`.
///
/// ```
/// use amlich::day_quality;
/// use amlich::sexagenary::Branch;
///
/// assert_eq!(vec![Branch::Ngo], day_quality::conflict_ages(Branch::Ty));
/// ```
pub fn conflict_ages(branch: Branch) -> Vec<Branch> {
    vec![branch.opposite()]
}

/// The twelve Trực (Kiến trừ thập nhị khách).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub enum Truc {
    Kien,
    Tru,
    Man,
    Binh,
    Dinh,
    Chap,
    Pha,
    Nguy,
    Thanh,
    Thu,
    Khai,
    Be,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrucRecord {
    pub description: &'static str,
    pub suitable: &'static [&'static str],
    pub avoid: &'static [&'static str],
}

impl Truc {
    pub const ALL: [Truc; 12] = [
        Truc::Kien,
        Truc::Tru,
        Truc::Man,
        Truc::Binh,
        Truc::Dinh,
        Truc::Chap,
        Truc::Pha,
        Truc::Nguy,
        Truc::Thanh,
        Truc::Thu,
        Truc::Khai,
        Truc::Be,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Truc::Kien => "Kiến",
            Truc::Tru => "Trừ",
            Truc::Man => "Mãn",
            Truc::Binh => "Bình",
            Truc::Dinh => "Định",
            Truc::Chap => "Chấp",
            Truc::Pha => "Phá",
            Truc::Nguy => "Nguy",
            Truc::Thanh => "Thành",
            Truc::Thu => "Thu",
            Truc::Khai => "Khai",
            Truc::Be => "Bế",
        }
    }

    pub fn kind(&self) -> DayKind {
        match self {
            Truc::Kien | Truc::Man | Truc::Binh | Truc::Dinh | Truc::Thanh | Truc::Khai => {
                DayKind::Auspicious
            }
            _ => DayKind::Inauspicious,
        }
    }

    pub fn record(&self) -> &'static TrucRecord {
        &TRUC_RECORDS[*self as usize]
    }
}

impl fmt::Display for Truc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static TRUC_RECORDS: [TrucRecord; 12] = [
    TrucRecord {
        description: "Trực Kiến - khởi đầu, dựng nên",
        suitable: &["Xuất hành", "Khai trương", "Nhậm chức", "Cầu tài"],
        avoid: &["Động thổ", "Đào giếng", "An táng"],
    },
    TrucRecord {
        description: "Trực Trừ - trừ bỏ cái cũ",
        suitable: &["Tẩy uế", "Chữa bệnh", "Dọn dẹp"],
        avoid: &["Cưới hỏi", "Khai trương", "Đi xa"],
    },
    TrucRecord {
        description: "Trực Mãn - đầy đủ, sung túc",
        suitable: &["Cầu tài", "Cúng tế", "Nhập kho", "Mở cửa hàng"],
        avoid: &["Kiện tụng", "Nhậm chức", "Uống thuốc"],
    },
    TrucRecord {
        description: "Trực Bình - bằng phẳng, yên ổn",
        suitable: &["Sửa đường", "Trát tường", "Cưới hỏi", "Giao dịch"],
        avoid: &["Đào mương", "Khai kênh"],
    },
    TrucRecord {
        description: "Trực Định - ổn định, vững chắc",
        suitable: &["Cưới hỏi", "Ký kết", "Nhập học", "Mua bán gia súc"],
        avoid: &["Kiện tụng", "Đi xa", "Chữa bệnh"],
    },
    TrucRecord {
        description: "Trực Chấp - giữ gìn, nắm giữ",
        suitable: &["Sửa nhà", "Trồng cây", "Tu tạo"],
        avoid: &["Xuất hành", "Dời nhà", "Mở kho"],
    },
    TrucRecord {
        description: "Trực Phá - phá vỡ, hao tổn",
        suitable: &["Phá dỡ nhà cũ", "Chữa bệnh"],
        avoid: &["Cưới hỏi", "Khai trương", "Ký kết", "Xuất hành"],
    },
    TrucRecord {
        description: "Trực Nguy - nguy hiểm, bấp bênh",
        suitable: &["Cúng bái", "Cầu an"],
        avoid: &["Leo cao", "Đi thuyền", "Khởi công", "Cưới hỏi"],
    },
    TrucRecord {
        description: "Trực Thành - thành tựu, viên mãn",
        suitable: &["Cưới hỏi", "Khai trương", "Nhập học", "Dọn về nhà mới"],
        avoid: &["Kiện tụng", "Tranh chấp"],
    },
    TrucRecord {
        description: "Trực Thu - thu hoạch, gom góp",
        suitable: &["Thu hoạch", "Nhập kho", "Thu nợ", "Mua bán"],
        avoid: &["An táng", "Khởi công", "Xuất hành"],
    },
    TrucRecord {
        description: "Trực Khai - mở ra, hanh thông",
        suitable: &["Khai trương", "Nhập học", "Cưới hỏi", "Động thổ"],
        avoid: &["An táng", "Chôn cất"],
    },
    TrucRecord {
        description: "Trực Bế - đóng lại, bế tắc",
        suitable: &["Đắp đê", "Lấp hố", "Xây tường"],
        avoid: &["Khai trương", "Chữa mắt", "Xuất hành", "Nhậm chức"],
    },
];

/// The Trực of lunar day `lunar_day` in `lunar_month`.
///
/// ```
/// use amlich::day_quality::{self, Truc};
///
/// assert_eq!(Truc::Kien, day_quality::day_truc(1, 1));
/// assert_eq!(Truc::Be, day_quality::day_truc(12, 1));
/// ```
pub fn day_truc(lunar_day: u32, lunar_month: u32) -> Truc {
    let index = (lunar_day as i64 + lunar_month as i64 - 2).rem_euclid(12);
    Truc::ALL[index as usize]
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct DayQuality {
    pub truc: Truc,
    pub quality: DayKind,
}

/// Trực of a lunar day and its classification.
pub fn day_quality(lunar_day: u32, lunar_month: u32) -> DayQuality {
    let truc = day_truc(lunar_day, lunar_month);
    DayQuality {
        truc,
        quality: truc.kind(),
    }
}
