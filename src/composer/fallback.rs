//! Fixed candidate lists used when composition cannot produce anything

use crate::types::{GenderBucket, NameCandidate};

/// Two names keyed only by gender bucket
pub fn gender_fallback(bucket: GenderBucket) -> Vec<NameCandidate> {
    match bucket {
        GenderBucket::Female => vec![
            NameCandidate::fixed("지혜", ["智", "慧"], "wisdom, intelligence", "ji-hye", 75, "전통적인 의미를 담은 균형잡힌 이름입니다."),
            NameCandidate::fixed("미영", ["美", "英"], "beauty, flower", "mi-yeong", 70, "한국에서 널리 사랑받는 전통적인 이름입니다."),
        ],
        GenderBucket::Male => vec![
            NameCandidate::fixed("현우", ["賢", "宇"], "wise, universe", "hyeon-u", 75, "전통적인 의미를 담은 균형잡힌 이름입니다."),
            NameCandidate::fixed("준호", ["俊", "浩"], "handsome, vast", "jun-ho", 70, "한국에서 널리 사랑받는 전통적인 이름입니다."),
        ],
    }
}

/// Four names served when the whole recommendation path fails
pub fn static_recommendations() -> Vec<NameCandidate> {
    vec![
        NameCandidate::fixed("지민", ["智", "民"], "wisdom, people", "ji-min", 75, "지혜로운 시민이라는 뜻으로, 한국 사회에 잘 적응할 수 있는 이름입니다."),
        NameCandidate::fixed("현수", ["賢", "秀"], "wise, excellent", "hyeon-su", 72, "현명하고 뛰어나다는 의미로, 학업과 사회생활에서 성공을 기원하는 이름입니다."),
        NameCandidate::fixed("민정", ["敏", "靜"], "quick, calm", "min-jeong", 70, "빠르고 침착하다는 뜻으로, 균형잡힌 성격을 나타내는 이름입니다."),
        NameCandidate::fixed("서연", ["瑞", "娟"], "auspicious, beautiful", "seo-yeon", 68, "상서롭고 아름답다는 의미로, 밝은 미래를 상징하는 이름입니다."),
    ]
}
